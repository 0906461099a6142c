//! Open-Meteo API client.
//!
//! One client covers both endpoints the app needs: the forecast API for
//! temperatures and the geocoding API for resolving city names, free and
//! without an API key.

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use skycast_core::WeatherError;

use crate::types::{CurrentWeather, HourlyForecast, Place, WeatherCondition, WeatherData};

const FORECAST_URL: &str = "https://api.open-meteo.com";
const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Candidates requested per geocoding search
const SEARCH_RESULT_LIMIT: &str = "10";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    // Absent entirely when nothing matches
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    latitude: f64,
    longitude: f64,
    hourly: Option<HourlySeries>,
    current_weather: Option<CurrentConditions>,
}

#[derive(Debug, Deserialize)]
struct HourlySeries {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
}

/// HTTP client for the Open-Meteo forecast and geocoding APIs.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    forecast_base: String,
    geocoding_base: String,
}

impl WeatherClient {
    /// Create a client against the public Open-Meteo endpoints.
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_endpoints(FORECAST_URL, GEOCODING_URL)
    }

    /// Create a client against custom endpoints (configuration and tests).
    pub fn with_endpoints(
        forecast_base: impl Into<String>,
        geocoding_base: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            forecast_base: trim_base(forecast_base.into()),
            geocoding_base: trim_base(geocoding_base.into()),
        })
    }

    /// Fetch the forecast for a coordinate pair.
    ///
    /// Asks for the hourly temperature series plus the current conditions
    /// block in a single round trip. Empty hourly arrays are preserved as-is;
    /// an absent hourly block is treated as a malformed response.
    pub async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherData, WeatherError> {
        let url = format!("{}/v1/forecast", self.forecast_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", "temperature_2m".to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Http(response.status().as_u16()));
        }

        let body: ForecastResponse = response.json().await?;
        let hourly = body.hourly.ok_or_else(|| {
            WeatherError::Parse("forecast response missing hourly temperatures".to_string())
        })?;

        tracing::debug!("Fetched weather for {:.4},{:.4}", latitude, longitude);

        Ok(WeatherData {
            latitude: body.latitude,
            longitude: body.longitude,
            current: body.current_weather.map(|c| CurrentWeather {
                temperature: c.temperature,
                wind_speed: c.windspeed,
                condition: WeatherCondition::from_wmo_code(c.weathercode),
            }),
            hourly: HourlyForecast {
                time: hourly.time,
                temperature_2m: hourly.temperature_2m,
            },
            fetched_at: Utc::now(),
        })
    }

    /// Search for places matching a query.
    ///
    /// Empty and whitespace-only queries short-circuit to no results without
    /// touching the network.
    pub async fn search_location(&self, query: &str) -> Result<Vec<Place>, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/v1/search", self.geocoding_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", query),
                ("count", SEARCH_RESULT_LIMIT),
                ("language", "en"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Http(response.status().as_u16()));
        }

        let body: GeocodingResponse = response.json().await?;
        let places: Vec<Place> = body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|r| Place {
                name: r.name,
                latitude: r.latitude,
                longitude: r.longitude,
                country: r.country,
            })
            .collect();

        tracing::debug!("Search for '{}' returned {} place(s)", query, places.len());
        Ok(places)
    }

    /// Resolve a query to its best matching place.
    ///
    /// The first geocoding result wins; no match is a `LocationNotFound`.
    pub async fn geocode(&self, query: &str) -> Result<Place, WeatherError> {
        self.search_location(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::LocationNotFound(query.trim().to_string()))
    }
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}
