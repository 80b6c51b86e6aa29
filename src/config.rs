//! Application configuration
//!
//! The only required setting is the OpenWeatherMap API key, read from the
//! environment (a `.env` file is honored via dotenv in `main`). A missing
//! key is fatal and is surfaced before any request is attempted.

use std::env;

use thiserror::Error;

/// Environment variable holding the provider API key
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Errors raised while assembling the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key in the environment
    #[error(
        "OpenWeatherMap API key is missing. Set {API_KEY_VAR} in the environment or a .env file."
    )]
    MissingApiKey,
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeatherMap API key
    pub api_key: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self { api_key })
    }
}
