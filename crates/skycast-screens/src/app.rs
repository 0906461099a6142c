//! Application composition root.
//!
//! Builds the shared services once from a `Config` and hands handles to
//! the screens. There is no global state: whoever owns the `App` owns
//! every service lifetime.

use skycast_core::{AppError, Config};
use skycast_store::LocationClient;
use skycast_weather::{Locator, WeatherClient};

use crate::{CurrentLocationScreen, SavedLocationsScreen, SearchScreen};

/// Owns the store, weather client, and locator for the whole process.
pub struct App {
    config: Config,
    locations: LocationClient,
    weather_client: WeatherClient,
    locator: Locator,
}

impl App {
    /// Build the application from the on-disk configuration.
    ///
    /// # Errors
    ///
    /// Fails when the config cannot be loaded or any service cannot be
    /// constructed, most notably when the saved-locations database cannot
    /// be opened.
    pub fn new() -> Result<Self, AppError> {
        Self::from_config(Config::load()?)
    }

    /// Build the application from an explicit configuration.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        // The database lives in the config directory; make sure it exists
        // before the store tries to create the file.
        std::fs::create_dir_all(&config.config_dir)?;

        let db_path = config.database_path();
        let locations = LocationClient::open(&db_path)?;
        tracing::info!("Saved location store opened at {:?}", db_path);

        let weather_client = WeatherClient::with_endpoints(
            &config.weather.forecast_url,
            &config.weather.geocoding_url,
        )?;
        let locator = Locator::with_endpoint(&config.locator.endpoint)?;
        tracing::info!("Weather client and locator initialized");

        Ok(Self {
            config,
            locations,
            weather_client,
            locator,
        })
    }

    /// Screen for the device's current position.
    pub fn current_location_screen(&self) -> CurrentLocationScreen {
        CurrentLocationScreen::new(self.locator.clone(), self.weather_client.clone())
    }

    /// Screen for free-text city search and saving.
    pub fn search_screen(&self) -> SearchScreen {
        SearchScreen::new(self.locations.clone(), self.weather_client.clone())
    }

    /// Screen for the saved favorites list.
    pub fn saved_locations_screen(&self) -> SavedLocationsScreen {
        SavedLocationsScreen::new(self.locations.clone(), self.weather_client.clone())
    }

    /// Handle to the saved location store.
    pub fn locations(&self) -> &LocationClient {
        &self.locations
    }

    /// Application configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
