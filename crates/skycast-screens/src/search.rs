//! Location search screen.
//!
//! Geocodes a free-text query, fetches weather for the best match, and
//! saves the query as a favorite. The four-location cap and the duplicate
//! check live here, not in the store: the store accepts anything.

use skycast_core::{AppError, WeatherError};
use skycast_store::{LocationClient, SavedLocation};
use skycast_weather::{Place, WeatherClient, WeatherData};

/// Shown when the forecast round trip fails for a found location.
const SEARCH_ERROR: &str = "Error fetching weather data";

/// Most saved locations the screen will accept.
pub const MAX_SAVED_LOCATIONS: usize = 4;

/// What happened to a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The city was persisted with the returned row.
    Saved(SavedLocation),
    /// The city is already in the saved list; nothing was written.
    Duplicate,
    /// Four locations are already saved; nothing was written.
    LimitReached,
}

/// State behind the "look up any city" view.
pub struct SearchScreen {
    locations: LocationClient,
    weather_client: WeatherClient,
    query: String,
    place: Option<Place>,
    weather: Option<WeatherData>,
    error: Option<&'static str>,
    saved: Vec<SavedLocation>,
}

impl SearchScreen {
    pub fn new(locations: LocationClient, weather_client: WeatherClient) -> Self {
        Self {
            locations,
            weather_client,
            query: String::new(),
            place: None,
            weather: None,
            error: None,
            saved: Vec::new(),
        }
    }

    /// Update the query text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Refresh the saved list; called whenever the screen gains focus.
    pub async fn on_focus(&mut self) {
        match self.locations.list().await {
            Ok(saved) => {
                self.saved = saved;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Saved list refresh failed: {}", e);
                self.error = Some(e.user_message());
            }
        }
    }

    /// Geocode the current query and fetch weather for the best match.
    pub async fn search(&mut self) {
        let place = match self.weather_client.geocode(&self.query).await {
            Ok(place) => place,
            Err(e @ WeatherError::LocationNotFound(_)) => {
                tracing::debug!("No match for '{}'", self.query);
                self.error = Some(e.user_message());
                return;
            }
            Err(e) => {
                tracing::warn!("Geocoding failed: {}", e);
                self.error = Some(SEARCH_ERROR);
                return;
            }
        };

        match self
            .weather_client
            .fetch_weather(place.latitude, place.longitude)
            .await
        {
            Ok(data) => {
                tracing::debug!(
                    "Weather for {}: {:?}",
                    place.display_name(),
                    data.current_temperature()
                );
                self.place = Some(place);
                self.weather = Some(data);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Weather fetch failed: {}", e);
                self.error = Some(SEARCH_ERROR);
            }
        }
    }

    /// Save the current query as a favorite location.
    ///
    /// Rejects a city already present in the saved list and a fifth save
    /// when [`MAX_SAVED_LOCATIONS`] rows exist. The duplicate check compares
    /// the query against the `city` column. On success the saved list is
    /// re-read from the store.
    ///
    /// # Errors
    ///
    /// Returns the store error when the insert fails; the screen's error
    /// message is set before it propagates.
    pub async fn save_location(&mut self) -> Result<SaveOutcome, AppError> {
        let city = self.query.trim();

        if self.saved.iter().any(|loc| loc.city == city) {
            tracing::debug!("'{}' already saved", city);
            return Ok(SaveOutcome::Duplicate);
        }
        if self.saved.len() >= MAX_SAVED_LOCATIONS {
            tracing::debug!("Saved location limit of {} reached", MAX_SAVED_LOCATIONS);
            return Ok(SaveOutcome::LimitReached);
        }

        match self.locations.create(city).await {
            Ok(row) => {
                match self.locations.list().await {
                    Ok(saved) => self.saved = saved,
                    Err(e) => {
                        tracing::warn!("Saved list refresh after save failed: {}", e);
                        self.saved.push(row.clone());
                    }
                }
                self.error = None;
                Ok(SaveOutcome::Saved(row))
            }
            Err(e) => {
                tracing::warn!("Save failed: {}", e);
                self.error = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Place the last successful search resolved to, if any.
    pub fn place(&self) -> Option<&Place> {
        self.place.as_ref()
    }

    /// Last fetched weather, if any.
    pub fn weather(&self) -> Option<&WeatherData> {
        self.weather.as_ref()
    }

    /// Current error message, if any.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Saved locations as of the last focus or save.
    pub fn saved(&self) -> &[SavedLocation] {
        &self.saved
    }
}
