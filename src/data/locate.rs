//! Device location lookup
//!
//! A terminal process has no platform geolocation service, so the "device"
//! position comes from an IP geolocation lookup. Callers treat any failure
//! the same way a browser treats a denied permission: fall back and tell the
//! user.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::Coordinates;

/// Base URL of the IP geolocation service
const LOCATE_BASE_URL: &str = "http://ip-api.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when resolving the device location
#[derive(Debug, Error)]
pub enum LocationError {
    /// The service could not resolve a usable position
    #[error("Device location unavailable")]
    Unavailable,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Shape of the ip-api.com JSON response
#[derive(Debug, Deserialize)]
struct IpLocateResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

/// Resolves the device's approximate position from its public IP
#[derive(Debug, Clone)]
pub struct DeviceLocator {
    client: Client,
    base_url: String,
}

impl DeviceLocator {
    /// Creates a locator against the production service.
    pub fn new() -> Self {
        Self::with_base_url(LOCATE_BASE_URL)
    }

    /// Creates a locator with a custom base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Looks up the device's coordinates.
    ///
    /// Suspends until the service responds; a failed lookup, an error status
    /// or out-of-range coordinates all resolve to
    /// `LocationError::Unavailable`.
    pub async fn locate(&self) -> Result<Coordinates, LocationError> {
        let url = format!("{}/json?fields=status,lat,lon", self.base_url);
        let response = self.client.get(&url).send().await?;
        let body: IpLocateResponse = response
            .json()
            .await
            .map_err(|_| LocationError::Unavailable)?;

        if body.status != "success" {
            return Err(LocationError::Unavailable);
        }

        Coordinates::new(body.lat, body.lon).map_err(|_| LocationError::Unavailable)
    }
}

impl Default for DeviceLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_response() {
        let body: IpLocateResponse =
            serde_json::from_str(r#"{"status":"success","lat":-0.1022,"lon":34.7617}"#).unwrap();
        assert_eq!(body.status, "success");
        assert!((body.lat - (-0.1022)).abs() < 1e-9);
    }

    #[test]
    fn test_parse_failure_response_defaults_coordinates() {
        // A failed lookup omits lat/lon entirely
        let body: IpLocateResponse = serde_json::from_str(r#"{"status":"fail"}"#).unwrap();
        assert_eq!(body.status, "fail");
        assert_eq!(body.lat, 0.0);
        assert_eq!(body.lon, 0.0);
    }
}
