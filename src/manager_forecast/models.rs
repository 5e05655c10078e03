use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A weather condition as reported by OpenWeatherMap in its `weather` array
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: u32,
    #[serde(rename(deserialize = "main"))]
    pub category: String,
    pub description: String,
    pub icon: String,
}

/// One 3-hour forecast sample
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temp_min: f64,
    pub temp_max: f64,
    pub condition: WeatherCondition,
    pub humidity: u8,
}

/// One UTC calendar day rolled up from forecast samples
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub representative_timestamp: DateTime<Utc>,
    pub temp_min: f64,
    pub temp_max: f64,
    pub condition: WeatherCondition,
    pub humidity: u8,
}

impl DailySummary {
    /// Starts a new day from the first sample seen for it
    ///
    /// # Arguments
    ///
    /// * 'sample' - the first sample that maps to this day
    pub fn seed(sample: &ForecastSample) -> Self {
        Self {
            date: sample.timestamp.date_naive(),
            representative_timestamp: sample.timestamp,
            temp_min: sample.temp_min,
            temp_max: sample.temp_max,
            condition: sample.condition.clone(),
            humidity: sample.humidity,
        }
    }
}
