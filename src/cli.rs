//! Command-line interface parsing for Skycast
//!
//! Arguments choose where the dashboard starts (device location, a searched
//! city, or explicit coordinates) and the initial display units.

use clap::Parser;
use thiserror::Error;

use crate::data::{Coordinates, SpeedUnit, TemperatureUnit};

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// Latitude/longitude outside the valid ranges
    #[error("Invalid coordinates: latitude must be in [-90, 90], longitude in [-180, 180]")]
    InvalidCoordinates,
}

/// Skycast - a terminal weather dashboard
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Weather dashboard with forecasts, alerts and city search")]
#[command(version)]
pub struct Cli {
    /// City to show at startup instead of the device location
    ///
    /// Examples:
    ///   skycast              # use the device location
    ///   skycast "Kisumu"     # search for a city
    ///   skycast --lat -0.1 --lon 34.76
    #[arg(value_name = "CITY", conflicts_with_all = ["lat", "lon"])]
    pub city: Option<String>,

    /// Latitude of an explicit startup location (requires --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of an explicit startup location (requires --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Show temperatures in Fahrenheit
    #[arg(long)]
    pub fahrenheit: bool,

    /// Show wind speeds in mph
    #[arg(long)]
    pub mph: bool,
}

/// Where the dashboard gets its first location from
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StartupLocation {
    /// Resolve the device's position (with the built-in fallback)
    #[default]
    Device,
    /// Resolve a searched city name
    City(String),
    /// Use explicit coordinates
    Fixed(Coordinates),
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Initial location source
    pub location: StartupLocation,
    /// Initial temperature display unit
    pub temperature_unit: TemperatureUnit,
    /// Initial wind speed display unit
    pub speed_unit: SpeedUnit,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let location = match (&cli.city, cli.lat, cli.lon) {
            (Some(city), _, _) => StartupLocation::City(city.clone()),
            (None, Some(lat), Some(lon)) => StartupLocation::Fixed(
                Coordinates::new(lat, lon).map_err(|_| CliError::InvalidCoordinates)?,
            ),
            _ => StartupLocation::Device,
        };

        Ok(Self {
            location,
            temperature_unit: if cli.fahrenheit {
                TemperatureUnit::Fahrenheit
            } else {
                TemperatureUnit::Celsius
            },
            speed_unit: if cli.mph {
                SpeedUnit::Mph
            } else {
                SpeedUnit::Kph
            },
        })
    }
}
