use std::fmt;
use chrono::FixedOffset;
use log::info;
use serde::Serialize;
use crate::manager_db::CredentialStore;
use crate::manager_db::errors::DBError;
use crate::manager_forecast::{aggregate, aggregate_with_offset};
use crate::manager_forecast::models::DailySummary;
use crate::manager_owm::WeatherSource;
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::models::CurrentConditions;

/// Current conditions and daily forecast for one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub city: String,
    pub country: String,
    pub current: CurrentConditions,
    pub days: Vec<DailySummary>,
}

#[derive(Debug)]
pub enum DashboardError {
    EmptyCity,
    MissingCredential,
    Store(DBError),
    Remote(OWMError),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DashboardError::EmptyCity => write!(f, "a city name is required"),
            DashboardError::MissingCredential => write!(f, "API key is required: store one with PUT /credential"),
            DashboardError::Store(e) => write!(f, "{}", e),
            DashboardError::Remote(e) => write!(f, "{}", e),
        }
    }
}
impl From<DBError> for DashboardError {
    fn from(e: DBError) -> Self {
        DashboardError::Store(e)
    }
}
impl From<OWMError> for DashboardError {
    fn from(e: OWMError) -> Self {
        match e {
            OWMError::MissingCredential => DashboardError::MissingCredential,
            e => DashboardError::Remote(e),
        }
    }
}

/// Fetches current weather and forecast for a city and rolls the forecast up into days.
///
/// The credential is read before anything else, no request is made without one. Both
/// requests are issued concurrently and the first failure fails the whole dashboard, so
/// there is never a partial result.
///
/// # Arguments
///
/// * 'store' - where the API key is kept
/// * 'source' - the weather service
/// * 'city' - city name as entered by the user
/// * 'days' - max number of days to keep from the forecast
pub async fn fetch_dashboard<C, S>(store: &C, source: &S, city: &str, days: usize) -> Result<Dashboard, DashboardError>
where
    C: CredentialStore,
    S: WeatherSource,
{
    let city = city.trim();
    if city.is_empty() {
        return Err(DashboardError::EmptyCity);
    }

    let api_key = store.get_credential()?.ok_or(DashboardError::MissingCredential)?;

    let (current, feed) = tokio::try_join!(
        source.current_weather(city, &api_key),
        source.forecast(city, &api_key),
    )?;

    // The forecast reports the city's offset, used for the midday window only
    let mut summaries = match FixedOffset::east_opt(feed.utc_offset_secs) {
        Some(offset) => aggregate_with_offset(&feed.samples, offset),
        None => aggregate(&feed.samples),
    };
    summaries.truncate(days);

    info!("{} samples for {} rolled up into {} days", feed.samples.len(), feed.city, summaries.len());

    Ok(Dashboard {
        city: feed.city,
        country: feed.country,
        current,
        days: summaries,
    })
}
