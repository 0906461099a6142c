//! Weather services for Skycast
//!
//! Provides forecast and geocoding lookups via the Open-Meteo API plus
//! approximate device positioning via IP geolocation.

pub mod client;
pub mod locator;
pub mod types;

pub use client::WeatherClient;
pub use locator::{Locator, Position};
pub use types::{CurrentWeather, HourlyForecast, Place, WeatherCondition, WeatherData};
