//! Centralized error types for the Skycast application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// All errors in the Skycast application should be convertible to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Saved locations error: {0}")]
    Store(#[from] StoreError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Store(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Location(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Saved-location storage errors (SQLite, local state).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Read failed: {0}")]
    Read(String),

    #[error("Write failed: {0}")]
    Write(String),
}

impl StoreError {
    pub fn unavailable(source: impl std::fmt::Display) -> Self {
        StoreError::Unavailable(source.to_string())
    }

    pub fn read(source: impl std::fmt::Display) -> Self {
        StoreError::Read(source.to_string())
    }

    pub fn write(source: impl std::fmt::Display) -> Self {
        StoreError::Write(source.to_string())
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "Unable to access saved locations. Try restarting the app.",
            StoreError::Read(_) => "Error fetching saved locations",
            StoreError::Write(_) => "Error saving location",
        }
    }
}

/// Weather service errors (forecast and geocoding lookups).
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather API returned status {0}")]
    Http(u16),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Invalid response: {0}")]
    Parse(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound(_) => "Location not found",
            WeatherError::Network(_) | WeatherError::Http(_) | WeatherError::Parse(_) => {
                "Error fetching weather data"
            }
        }
    }
}

/// Device location errors.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location service unavailable")]
    ServiceUnavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Location error: {0}")]
    Other(String),
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => "Permission to access location was denied",
            LocationError::ServiceUnavailable | LocationError::Timeout | LocationError::Other(_) => {
                "Error fetching location or weather data"
            }
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_location_error(self) -> LocationError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_location_error(self) -> LocationError {
        if self.is_timeout() {
            LocationError::Timeout
        } else if self.is_connect() {
            LocationError::ServiceUnavailable
        } else if let Some(status) = self.status() {
            match status.as_u16() {
                401 | 403 => LocationError::PermissionDenied,
                _ => LocationError::ServiceUnavailable,
            }
        } else {
            LocationError::Other(self.to_string())
        }
    }
}
