use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use crate::manager_forecast::models::{ForecastSample, WeatherCondition};

#[derive(Deserialize)]
pub struct MainData {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: f64,
}

#[derive(Deserialize, Default)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: u16,
}

#[derive(Deserialize, Default)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
}

#[serde_as]
#[derive(Deserialize)]
pub struct CurrentDocument {
    pub name: String,
    pub main: MainData,
    pub weather: Vec<WeatherCondition>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub sys: Sys,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub dt: DateTime<Utc>,
}

#[serde_as]
#[derive(Deserialize)]
pub struct ForecastItem {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub dt: DateTime<Utc>,
    pub main: MainData,
    pub weather: Vec<WeatherCondition>,
}

#[derive(Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Deserialize)]
pub struct ForecastDocument {
    pub list: Vec<ForecastItem>,
    pub city: City,
}

/// Current weather for a city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub observed_at: DateTime<Utc>,
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_deg: u16,
    pub condition: WeatherCondition,
}

/// Forecast samples for a city as resolved by the weather service
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastFeed {
    pub city: String,
    pub country: String,
    pub utc_offset_secs: i32,
    pub samples: Vec<ForecastSample>,
}
