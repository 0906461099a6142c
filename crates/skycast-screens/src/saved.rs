//! Saved locations screen.
//!
//! Lists the favorites and re-fetches weather for every row on each
//! refresh; nothing but the city name is ever persisted. Lookups fan out
//! as independent tasks and the screen state only updates once all of
//! them have come back, so the view never renders a half-merged list.

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use skycast_core::WeatherError;
use skycast_store::LocationClient;
use skycast_weather::{WeatherClient, WeatherData};

/// Per-row fallback when a lookup task is lost rather than failed.
const LOOKUP_ERROR: &str = "Error fetching weather data";

/// Shown when the store delete fails.
const REMOVE_ERROR: &str = "Error removing saved location";

/// One saved city merged with its freshly fetched weather.
#[derive(Debug, Clone)]
pub struct SavedLocationView {
    pub id: i64,
    pub city: String,
    pub weather: Option<WeatherData>,
    /// Per-row failure; other rows are unaffected.
    pub error: Option<&'static str>,
}

/// State behind the favorites view.
pub struct SavedLocationsScreen {
    locations: LocationClient,
    weather_client: WeatherClient,
    rows: Vec<SavedLocationView>,
    error: Option<&'static str>,
}

impl SavedLocationsScreen {
    pub fn new(locations: LocationClient, weather_client: WeatherClient) -> Self {
        Self {
            locations,
            weather_client,
            rows: Vec::new(),
            error: None,
        }
    }

    /// Re-read the saved list and fetch weather for every row.
    ///
    /// Each row gets its own geocode-plus-forecast round trip; a row whose
    /// city no longer geocodes reports "Location not found" on that row
    /// only. When `cancel` fires before every lookup has joined, in-flight
    /// tasks are aborted and the previous screen state stays put.
    pub async fn refresh(&mut self, cancel: &CancellationToken) {
        let saved = match self.locations.list().await {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("Saved list read failed: {}", e);
                self.error = Some(e.user_message());
                return;
            }
        };

        let mut lookups = JoinSet::new();
        for (idx, row) in saved.iter().enumerate() {
            let client = self.weather_client.clone();
            let city = row.city.clone();
            lookups.spawn(async move {
                let result = match client.geocode(&city).await {
                    Ok(place) => client.fetch_weather(place.latitude, place.longitude).await,
                    Err(e) => Err(e),
                };
                (idx, result)
            });
        }

        let mut results: Vec<Option<Result<WeatherData, WeatherError>>> =
            saved.iter().map(|_| None).collect();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Refresh cancelled, aborting weather lookups");
                    lookups.abort_all();
                    return;
                }
                joined = lookups.join_next() => match joined {
                    Some(Ok((idx, result))) => results[idx] = Some(result),
                    Some(Err(e)) => tracing::warn!("Weather lookup task failed: {}", e),
                    None => break,
                }
            }
        }

        self.error = None;
        self.rows = saved
            .into_iter()
            .zip(results)
            .map(|(row, result)| {
                let (weather, error) = match result {
                    Some(Ok(data)) => (Some(data), None),
                    Some(Err(e)) => {
                        tracing::debug!("Lookup for '{}' failed: {}", row.city, e);
                        (None, Some(e.user_message()))
                    }
                    None => (None, Some(LOOKUP_ERROR)),
                };
                SavedLocationView {
                    id: row.id,
                    city: row.city,
                    weather,
                    error,
                }
            })
            .collect();
    }

    /// Delete a saved location and drop its row from the view.
    pub async fn remove_location(&mut self, id: i64) {
        match self.locations.remove(id).await {
            Ok(()) => {
                self.rows.retain(|row| row.id != id);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Remove failed: {}", e);
                self.error = Some(REMOVE_ERROR);
            }
        }
    }

    /// Rows as of the last completed refresh.
    pub fn rows(&self) -> &[SavedLocationView] {
        &self.rows
    }

    /// Screen-level error (list read or remove failure), if any.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }
}
