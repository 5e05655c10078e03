pub mod errors;
pub mod models;

use std::time::Duration;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use crate::manager_forecast::models::{ForecastSample, WeatherCondition};
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::models::{CurrentConditions, CurrentDocument, ForecastDocument, ForecastFeed};

/// Source of current weather and forecasts for a named city
pub trait WeatherSource {
    /// Returns current weather conditions for the given city
    async fn current_weather(&self, city: &str, api_key: &str) -> Result<CurrentConditions, OWMError>;

    /// Returns the 3-hour forecast samples for the given city
    async fn forecast(&self, city: &str, api_key: &str) -> Result<ForecastFeed, OWMError>;
}

/// Builds the display URL for an OpenWeatherMap icon code. No request is made.
///
/// # Arguments
///
/// * 'icon_base_url' - base url of the icon service
/// * 'icon' - icon code, e.g. '10d'
pub fn icon_url(icon_base_url: &str, icon: &str) -> String {
    format!("{}/{}@2x.png", icon_base_url.trim_end_matches('/'), icon)
}

#[derive(Clone, Copy)]
enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Endpoint::Current => "Weather API",
            Endpoint::Forecast => "Forecast API",
        }
    }
}

/// Struct for fetching current weather and forecasts from OpenWeatherMap
pub struct OpenWeatherMap {
    client: Client,
    base_url: String,
}

impl OpenWeatherMap {
    /// Returns an OpenWeatherMap struct ready for fetching weather data
    ///
    /// # Arguments
    ///
    /// * 'base_url' - base url of the API, e.g. 'https://api.openweathermap.org/data/2.5'
    /// * 'timeout_secs' - timeout for each request
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<OpenWeatherMap, OWMError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches and parses one document from the API, temperatures in Celsius
    ///
    /// # Arguments
    ///
    /// * 'endpoint' - which endpoint to call
    /// * 'city' - city name to search for
    /// * 'api_key' - OpenWeatherMap API key
    async fn get_document<T: DeserializeOwned>(&self, endpoint: Endpoint, city: &str, api_key: &str) -> Result<T, OWMError> {
        if api_key.is_empty() {
            return Err(OWMError::MissingCredential);
        }

        let url = format!("{}/{}", self.base_url, endpoint.path());
        debug!("requesting {} for {}", url, city);

        let req = self.client
            .get(url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(OWMError::Status { endpoint: endpoint.name(), status: status.as_u16() });
        }

        let json = req.text().await?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl WeatherSource for OpenWeatherMap {
    async fn current_weather(&self, city: &str, api_key: &str) -> Result<CurrentConditions, OWMError> {
        let doc: CurrentDocument = self.get_document(Endpoint::Current, city, api_key).await?;

        Ok(CurrentConditions {
            condition: first_condition(doc.weather)?,
            city: doc.name,
            country: doc.sys.country,
            observed_at: doc.dt,
            temp: doc.main.temp,
            feels_like: doc.main.feels_like,
            temp_min: doc.main.temp_min,
            temp_max: doc.main.temp_max,
            humidity: doc.main.humidity,
            pressure: doc.main.pressure,
            wind_speed: doc.wind.speed,
            wind_deg: doc.wind.deg,
        })
    }

    async fn forecast(&self, city: &str, api_key: &str) -> Result<ForecastFeed, OWMError> {
        let doc: ForecastDocument = self.get_document(Endpoint::Forecast, city, api_key).await?;

        let mut samples: Vec<ForecastSample> = Vec::with_capacity(doc.list.len());
        for item in doc.list {
            samples.push(ForecastSample {
                timestamp: item.dt,
                temp_min: item.main.temp_min,
                temp_max: item.main.temp_max,
                condition: first_condition(item.weather)?,
                humidity: item.main.humidity,
            });
        }

        Ok(ForecastFeed {
            city: doc.city.name,
            country: doc.city.country,
            utc_offset_secs: doc.city.timezone,
            samples,
        })
    }
}

/// Only the first reported condition is used, a record without any is malformed
///
/// # Arguments
///
/// * 'weather' - the weather array of a record
fn first_condition(weather: Vec<WeatherCondition>) -> Result<WeatherCondition, OWMError> {
    weather.into_iter()
        .next()
        .ok_or_else(|| OWMError::Document("record without weather condition".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_response() -> serde_json::Value {
        serde_json::json!({
            "coord": { "lon": -0.1257, "lat": 51.5085 },
            "weather": [ { "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" } ],
            "main": {
                "temp": 11.3, "feels_like": 10.6, "temp_min": 10.1, "temp_max": 12.4,
                "pressure": 1012, "humidity": 81
            },
            "wind": { "speed": 4.6, "deg": 240 },
            "dt": 1704110400,
            "sys": { "country": "GB" },
            "name": "London",
            "cod": 200
        })
    }

    fn forecast_item(dt: i64, temp_min: f64, temp_max: f64, id: u32, main: &str) -> serde_json::Value {
        serde_json::json!({
            "dt": dt,
            "main": {
                "temp": (temp_min + temp_max) / 2.0, "feels_like": temp_min,
                "temp_min": temp_min, "temp_max": temp_max, "pressure": 1015, "humidity": 76
            },
            "weather": [ { "id": id, "main": main, "description": main.to_lowercase(), "icon": "10d" } ],
            "dt_txt": "ignored"
        })
    }

    fn forecast_response() -> serde_json::Value {
        serde_json::json!({
            "cod": "200",
            "cnt": 3,
            "list": [
                forecast_item(1704096000, 8.0, 9.5, 800, "Clear"),
                forecast_item(1704106800, 9.0, 12.0, 500, "Rain"),
                forecast_item(1704182400, 5.0, 7.0, 801, "Clouds"),
            ],
            "city": { "id": 2643743, "name": "London", "country": "GB", "timezone": 3600 }
        })
    }

    fn client(server: &MockServer) -> OpenWeatherMap {
        OpenWeatherMap::new(&server.uri(), 5).unwrap()
    }

    #[tokio::test]
    async fn current_weather_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "secret"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_response()))
            .expect(1)
            .mount(&server)
            .await;

        let current = client(&server).current_weather("London", "secret").await.unwrap();

        assert_eq!(current.city, "London");
        assert_eq!(current.country, "GB");
        assert_eq!(current.observed_at, Utc.timestamp_opt(1704110400, 0).unwrap());
        assert_eq!(current.humidity, 81);
        assert_eq!(current.pressure, 1012.0);
        assert_eq!(current.wind_deg, 240);
        assert_eq!(current.condition.category, "Clouds");
        assert_eq!(current.condition.icon, "04d");
    }

    #[tokio::test]
    async fn forecast_is_parsed_into_samples() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "New York"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_response()))
            .mount(&server)
            .await;

        let feed = client(&server).forecast("New York", "secret").await.unwrap();

        assert_eq!(feed.city, "London");
        assert_eq!(feed.utc_offset_secs, 3600);
        assert_eq!(feed.samples.len(), 3);
        assert_eq!(feed.samples[1].timestamp, Utc.timestamp_opt(1704106800, 0).unwrap());
        assert_eq!(feed.samples[1].temp_max, 12.0);
        assert_eq!(feed.samples[1].condition.id, 500);
        assert_eq!(feed.samples[1].humidity, 76);
    }

    #[tokio::test]
    async fn error_status_is_carried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server).forecast("Atlantis", "secret").await.unwrap_err();

        assert!(matches!(err, OWMError::Status { status: 404, .. }));
        assert_eq!(err.to_string(), "Forecast API error: 404");
    }

    #[tokio::test]
    async fn unauthorized_current_weather_is_carried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client(&server).current_weather("London", "wrong").await.unwrap_err();

        assert_eq!(err.to_string(), "Weather API error: 401");
    }

    #[tokio::test]
    async fn empty_credential_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server).current_weather("London", "").await.unwrap_err();

        assert!(matches!(err, OWMError::MissingCredential));
    }

    #[tokio::test]
    async fn malformed_body_is_a_document_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"list\": 5}"))
            .mount(&server)
            .await;

        let err = client(&server).forecast("London", "secret").await.unwrap_err();

        assert!(matches!(err, OWMError::Document(_)));
    }

    #[tokio::test]
    async fn record_without_condition_is_a_document_error() {
        let server = MockServer::start().await;
        let mut body = forecast_response();
        body["list"][0]["weather"] = serde_json::json!([]);
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = client(&server).forecast("London", "secret").await.unwrap_err();

        assert!(matches!(err, OWMError::Document(_)));
    }

    #[test]
    fn icon_url_is_built_from_code() {
        assert_eq!(
            icon_url("https://openweathermap.org/img/wn/", "10d"),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
    }
}
