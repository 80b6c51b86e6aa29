//! Core data models for Skycast
//!
//! This module contains the canonical weather model used throughout the
//! application. All numeric fields are metric as delivered by the provider;
//! unit conversion is a presentation-time concern (see `crate::units`).

pub mod locate;
pub mod normalize;
pub mod openweather;

pub use locate::{DeviceLocator, LocationError};
pub use openweather::{GeoPlace, OneCallResponse, WeatherClient, WeatherError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL for provider icon assets, consumed by the presentation layer.
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Error returned when constructing coordinates outside the valid ranges.
#[derive(Debug, Error, PartialEq)]
#[error("coordinates out of range: lat {latitude}, lon {longitude}")]
pub struct InvalidCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A validated geographic position.
///
/// Immutable once obtained; latitude is within [-90, 90] and longitude
/// within [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates coordinates, rejecting out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinates {
                latitude,
                longitude,
            })
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A location match returned by free-text search.
///
/// Ephemeral: shown as a suggestion, never persisted individually.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationSuggestion {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// A previously selected location, persisted across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// The resolved place a snapshot belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Human-readable place name, empty if the geocode lookup found nothing
    pub name: String,
    /// Country code, empty if unknown
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Current weather conditions at the snapshot's location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Provider condition description (e.g. "light rain")
    pub description: String,
    /// Provider icon code (e.g. "10d"); trailing d/n is day/night
    pub icon: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Wind bearing in degrees
    pub wind_direction: f64,
    /// Pressure in hPa
    pub pressure: f64,
    /// UV index
    pub uv_index: f64,
    /// Visibility in meters
    pub visibility: f64,
    /// Sunrise as unix seconds (UTC)
    pub sunrise: i64,
    /// Sunset as unix seconds (UTC)
    pub sunset: i64,
    /// Offset of the location's timezone from UTC, in seconds
    pub timezone_offset: i64,
}

/// Temperature range for one forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

/// Day/night feels-like pair for one forecast day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeelsLikeRange {
    pub day: f64,
    pub night: f64,
}

/// Precipitation outlook for a forecast entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precipitation {
    /// Probability in [0, 1]
    pub probability: f64,
    /// Expected amount in millimeters, 0 when the provider omits it
    pub amount: f64,
}

/// One day of forecast data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    /// Forecast date as unix seconds
    pub date: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temperature: TemperatureRange,
    pub feels_like: FeelsLikeRange,
    pub humidity: u8,
    /// Wind speed in km/h
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub description: String,
    pub icon: String,
    pub uv_index: f64,
    pub precipitation: Precipitation,
}

/// One hour of forecast data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastEntry {
    /// Forecast time as unix seconds
    pub time: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    /// Wind speed in km/h
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub description: String,
    pub icon: String,
    pub precipitation: Precipitation,
}

/// Severity of a weather alert, ordered least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Minor,
    Moderate,
    Severe,
    Extreme,
}

/// An active weather alert for the snapshot's location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAlert {
    /// Issuing authority
    pub sender_name: String,
    /// Event name (e.g. "Wind Advisory")
    pub event: String,
    /// Start of the alert window, unix seconds
    pub start: i64,
    /// End of the alert window, unix seconds
    pub end: i64,
    pub description: String,
    pub severity: AlertSeverity,
}

/// The complete weather dataset for one location at one fetch time.
///
/// Immutable once constructed; the session replaces it wholesale on every
/// successful fetch and never patches it in place. `daily` holds at most 7
/// entries, `hourly` at most 24, and `alerts` is absent rather than empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecastEntry>,
    pub hourly: Vec<HourlyForecastEntry>,
    pub alerts: Option<Vec<WeatherAlert>>,
}

/// User-selected temperature display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Flips between Celsius and Fahrenheit.
    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }
}

/// User-selected wind speed display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedUnit {
    #[default]
    Kph,
    Mph,
}

impl SpeedUnit {
    /// Flips between km/h and mph.
    pub fn toggled(self) -> Self {
        match self {
            Self::Kph => Self::Mph,
            Self::Mph => Self::Kph,
        }
    }
}

/// Resolution of a provider icon asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconScale {
    X2,
    X4,
}

/// Builds the URL of the provider's PNG asset for an icon code.
pub fn icon_url(icon: &str, scale: IconScale) -> String {
    let suffix = match scale {
        IconScale::X2 => "2x",
        IconScale::X4 => "4x",
    };
    format!("{}/{}@{}.png", ICON_BASE_URL, icon, suffix)
}
