//! OpenWeatherMap API client
//!
//! Wraps the One Call 3.0 forecast endpoint and the Geocoding 1.0 search and
//! reverse-lookup endpoints. Raw response structs mirror the provider's field
//! names and exist only for deserialization; `normalize` turns them into the
//! canonical model.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use super::normalize;
use super::{Coordinates, LocationSuggestion, WeatherSnapshot};

/// Base URL for the One Call forecast API
const DATA_BASE_URL: &str = "https://api.openweathermap.org/data/3.0";

/// Base URL for the geocoding API
const GEO_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";

/// Per-request timeout; the provider defines none, so we bound it ourselves.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of suggestions requested from free-text search
const SEARCH_LIMIT: usize = 5;

/// Errors that can occur when talking to the weather provider
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider rejected the API key (HTTP 401)
    #[error("Invalid OpenWeatherMap API key")]
    InvalidApiKey,

    /// HTTP request failed (connection, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with an unexpected status code
    #[error("Unexpected response status: {0}")]
    Status(StatusCode),

    /// Failed to parse the JSON response
    #[error("Failed to parse provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the OpenWeatherMap forecast and geocoding endpoints
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    data_base: String,
    geo_base: String,
}

impl WeatherClient {
    /// Creates a new client against the production endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_urls(api_key, DATA_BASE_URL, GEO_BASE_URL)
    }

    /// Creates a client with custom base URLs (used by tests against a mock
    /// server).
    pub fn with_base_urls(
        api_key: impl Into<String>,
        data_base: impl Into<String>,
        geo_base: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            api_key: api_key.into(),
            data_base: data_base.into(),
            geo_base: geo_base.into(),
        }
    }

    /// Fetches the full weather snapshot for the given coordinates.
    ///
    /// Issues the forecast call and the reverse-geocode call concurrently,
    /// merges the resolved place name into the result, and normalizes the
    /// payload. A single attempt; failures surface immediately.
    pub async fn fetch(&self, coords: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        let (forecast, place) = futures::future::join(
            self.fetch_forecast(coords),
            self.reverse_geocode(coords),
        )
        .await;
        Ok(normalize::snapshot(forecast?, place?))
    }

    /// Fetches the raw One Call forecast payload for the given coordinates.
    pub async fn fetch_forecast(
        &self,
        coords: Coordinates,
    ) -> Result<OneCallResponse, WeatherError> {
        let url = format!(
            "{}/onecall?lat={}&lon={}&units=metric&exclude=minutely&appid={}",
            self.data_base,
            coords.latitude(),
            coords.longitude(),
            self.api_key
        );

        let text = self.get_checked(&url).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Looks up the human-readable place for a pair of coordinates.
    ///
    /// An empty provider result is not an error; the caller gets `None` and
    /// the snapshot falls back to empty name/country.
    pub async fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> Result<Option<GeoPlace>, WeatherError> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&limit=1&appid={}",
            self.geo_base,
            coords.latitude(),
            coords.longitude(),
            self.api_key
        );

        let text = self.get_checked(&url).await?;
        let mut places: Vec<GeoPlace> = serde_json::from_str(&text)?;
        Ok(if places.is_empty() {
            None
        } else {
            Some(places.remove(0))
        })
    }

    /// Searches locations matching a free-text query.
    ///
    /// Returns up to five suggestions in provider relevance order. An empty
    /// or whitespace-only query short-circuits to an empty result without a
    /// network call.
    pub async fn search_locations(
        &self,
        query: &str,
    ) -> Result<Vec<LocationSuggestion>, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/direct?q={}&limit={}&appid={}",
            self.geo_base, query, SEARCH_LIMIT, self.api_key
        );

        let text = self.get_checked(&url).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Issues a GET request and maps non-success statuses to errors.
    async fn get_checked(&self, url: &str) -> Result<String, WeatherError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(WeatherError::InvalidApiKey);
        }
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }
        Ok(response.text().await?)
    }
}

/// One Call 3.0 response payload
#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    pub lat: f64,
    pub lon: f64,
    pub timezone_offset: i64,
    pub current: RawCurrent,
    pub hourly: Vec<RawHourly>,
    pub daily: Vec<RawDaily>,
    pub alerts: Option<Vec<RawAlert>>,
}

/// Condition description sub-object carried by every weather entry
#[derive(Debug, Deserialize)]
pub struct RawCondition {
    pub description: String,
    pub icon: String,
}

/// Current conditions as delivered by the provider
#[derive(Debug, Deserialize)]
pub struct RawCurrent {
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: u8,
    pub uvi: f64,
    #[serde(default)]
    pub visibility: f64,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub sunrise: i64,
    pub sunset: i64,
    pub weather: Vec<RawCondition>,
}

/// Rain volume object used in hourly entries (`{"1h": mm}`)
#[derive(Debug, Deserialize)]
pub struct RawRainVolume {
    #[serde(rename = "1h", default)]
    pub one_hour: f64,
}

/// One hourly forecast entry
#[derive(Debug, Deserialize)]
pub struct RawHourly {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_deg: f64,
    #[serde(default)]
    pub pop: f64,
    pub rain: Option<RawRainVolume>,
    pub weather: Vec<RawCondition>,
}

/// Min/max block of a daily temperature forecast
#[derive(Debug, Deserialize)]
pub struct RawDailyTemp {
    pub min: f64,
    pub max: f64,
}

/// Day/night block of a daily feels-like forecast
#[derive(Debug, Deserialize)]
pub struct RawDailyFeelsLike {
    pub day: f64,
    pub night: f64,
}

/// One daily forecast entry
#[derive(Debug, Deserialize)]
pub struct RawDaily {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temp: RawDailyTemp,
    pub feels_like: RawDailyFeelsLike,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_deg: f64,
    #[serde(default)]
    pub uvi: f64,
    #[serde(default)]
    pub pop: f64,
    pub rain: Option<f64>,
    pub weather: Vec<RawCondition>,
}

/// One provider alert, severity still encoded as a tag list
#[derive(Debug, Deserialize)]
pub struct RawAlert {
    pub sender_name: String,
    pub event: String,
    pub start: i64,
    pub end: i64,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Reverse-geocode result: the human-readable place for coordinates
#[derive(Debug, Clone, Deserialize)]
pub struct GeoPlace {
    pub name: String,
    #[serde(default)]
    pub country: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geo_place_without_country() {
        let place: GeoPlace = serde_json::from_str(r#"{"name": "Atlantis"}"#).unwrap();
        assert_eq!(place.name, "Atlantis");
        assert_eq!(place.country, "");
    }

    #[test]
    fn test_parse_location_suggestions() {
        let json = r#"[
            {"name": "Nairobi", "country": "KE", "lat": -1.2833, "lon": 36.8167},
            {"name": "Nairobi", "country": "US", "lat": 40.33, "lon": -83.11}
        ]"#;
        let suggestions: Vec<LocationSuggestion> = serde_json::from_str(json).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].name, "Nairobi");
        assert_eq!(suggestions[0].country, "KE");
        assert!((suggestions[1].lat - 40.33).abs() < 1e-9);
    }

    #[test]
    fn test_parse_hourly_rain_volume() {
        let json = r#"{
            "dt": 1700000000, "temp": 18.0, "feels_like": 17.5, "humidity": 80,
            "wind_speed": 3.5, "wind_deg": 200, "pop": 0.6,
            "rain": {"1h": 0.8},
            "weather": [{"description": "light rain", "icon": "10d"}]
        }"#;
        let hour: RawHourly = serde_json::from_str(json).unwrap();
        assert!((hour.rain.unwrap().one_hour - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_parse_hourly_without_rain_or_pop() {
        let json = r#"{
            "dt": 1700000000, "temp": 18.0, "feels_like": 17.5, "humidity": 80,
            "wind_speed": 3.5, "wind_deg": 200,
            "weather": [{"description": "clear sky", "icon": "01n"}]
        }"#;
        let hour: RawHourly = serde_json::from_str(json).unwrap();
        assert!(hour.rain.is_none());
        assert_eq!(hour.pop, 0.0);
    }

    #[test]
    fn test_missing_required_structure_fails_deserialization() {
        // A payload without the daily array violates the input contract and
        // must fail at the parse boundary rather than normalize to something.
        let json = r#"{
            "lat": 0.0, "lon": 0.0, "timezone_offset": 0,
            "current": {
                "temp": 20.0, "feels_like": 20.0, "pressure": 1013, "humidity": 50,
                "uvi": 1.0, "visibility": 10000, "wind_speed": 2.0, "wind_deg": 90,
                "sunrise": 1, "sunset": 2,
                "weather": [{"description": "clear sky", "icon": "01d"}]
            },
            "hourly": []
        }"#;
        let result: Result<OneCallResponse, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_search_blank_query_short_circuits() {
        // Base URLs that would fail instantly if a request were attempted
        let client = WeatherClient::with_base_urls("key", "http://127.0.0.1:0", "http://127.0.0.1:0");
        let results = client.search_locations("   ").await.unwrap();
        assert!(results.is_empty());
        let results = client.search_locations("").await.unwrap();
        assert!(results.is_empty());
    }
}
