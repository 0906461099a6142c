//! Current-location weather screen.
//!
//! Resolves the device position, then fetches the forecast for it. Both
//! collaborators are injected at construction so the screen can be driven
//! end to end in tests.

use skycast_weather::{Locator, Position, WeatherClient, WeatherData};

/// Shown when the position-plus-forecast round trip fails for any reason
/// other than a denied permission.
const FETCH_ERROR: &str = "Error fetching location or weather data";

/// State behind the "weather where I am" view.
pub struct CurrentLocationScreen {
    locator: Locator,
    weather_client: WeatherClient,
    position: Option<Position>,
    weather: Option<WeatherData>,
    error: Option<&'static str>,
}

impl CurrentLocationScreen {
    pub fn new(locator: Locator, weather_client: WeatherClient) -> Self {
        Self {
            locator,
            weather_client,
            position: None,
            weather: None,
            error: None,
        }
    }

    /// Resolve the device position and fetch its forecast.
    ///
    /// On failure the previously shown data stays put; only the error
    /// message changes.
    pub async fn refresh(&mut self) {
        let position = match self.locator.current_position().await {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!("Position lookup failed: {}", e);
                // PermissionDenied keeps its dedicated message, everything
                // else collapses into the generic one
                self.error = Some(e.user_message());
                return;
            }
        };

        tracing::info!("Got position: {:.4}, {:.4}", position.latitude, position.longitude);
        self.position = Some(position.clone());

        match self
            .weather_client
            .fetch_weather(position.latitude, position.longitude)
            .await
        {
            Ok(data) => {
                tracing::debug!(
                    "Current weather near {:?}: {:?}",
                    position.city,
                    data.current_temperature()
                );
                self.weather = Some(data);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Weather fetch failed: {}", e);
                // One message covers the whole round trip on this screen
                self.error = Some(FETCH_ERROR);
            }
        }
    }

    /// Last resolved position, if any.
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Last fetched weather, if any.
    pub fn weather(&self) -> Option<&WeatherData> {
        self.weather.as_ref()
    }

    /// Current error message, if any.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// True until the first refresh has produced either weather or an error.
    pub fn is_loading(&self) -> bool {
        self.weather.is_none() && self.error.is_none()
    }
}
