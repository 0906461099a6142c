//! Device position via IP geolocation.
//!
//! A mobile build would ask the OS location service; this build asks an IP
//! geolocation endpoint for an approximate position, no API key required.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use skycast_core::{LocationError, ReqwestErrorExt};

const LOCATOR_URL: &str = "http://ip-api.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Approximate device position.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    // "success" or "fail"
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

/// IP geolocation client.
#[derive(Debug, Clone)]
pub struct Locator {
    client: Client,
    base: String,
}

impl Locator {
    /// Create a locator against the public endpoint.
    pub fn new() -> Result<Self, LocationError> {
        Self::with_endpoint(LOCATOR_URL)
    }

    /// Create a locator against a custom endpoint (configuration and tests).
    pub fn with_endpoint(base: impl Into<String>) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LocationError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    /// Resolve the current approximate position.
    pub async fn current_position(&self) -> Result<Position, LocationError> {
        let url = format!("{}/json", self.base);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| e.into_location_error())?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            return Err(LocationError::ServiceUnavailable);
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Other(e.to_string()))?;

        if body.status != "success" {
            return Err(LocationError::ServiceUnavailable);
        }

        let (latitude, longitude) = body.lat.zip(body.lon).ok_or_else(|| {
            LocationError::Other("locator response missing coordinates".to_string())
        })?;

        tracing::debug!(
            "Located device near {:?} ({:.4},{:.4})",
            body.city,
            latitude,
            longitude
        );

        Ok(Position {
            latitude,
            longitude,
            city: body.city,
        })
    }
}
