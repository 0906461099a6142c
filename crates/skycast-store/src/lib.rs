//! Local persistence for Skycast.
//!
//! Provides the SQLite-backed saved location store plus an async client
//! suitable for screen controllers.

pub mod client;
pub mod store;
pub mod types;

pub use client::LocationClient;
pub use store::SavedLocationStore;
pub use types::SavedLocation;
