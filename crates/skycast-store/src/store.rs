//! SQLite-based saved location storage.
//!
//! This module provides `SavedLocationStore`, the local persistence layer for
//! the cities a user has saved. The schema is a single `saved_locations`
//! table holding an AUTOINCREMENT id and a city name.

use rusqlite::{params, Connection};
use std::path::Path;

use skycast_core::StoreError;

use crate::types::SavedLocation;

/// SQLite-based saved location storage.
///
/// All methods are synchronous; wrap the store in a [`crate::LocationClient`]
/// to use it from async code.
pub struct SavedLocationStore {
    conn: Connection,
}

impl SavedLocationStore {
    /// Open a store at the given path.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(StoreError::unavailable)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Create an in-memory store (tests and previews).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::unavailable)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Initialize the database schema. Safe to call repeatedly.
    ///
    /// AUTOINCREMENT keeps removed ids from being reused, so a row id stays
    /// a stable handle for the lifetime of the database file.
    pub fn initialize(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS saved_locations (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    city TEXT NOT NULL
                );
                "#,
            )
            .map_err(StoreError::unavailable)
    }

    /// Persist a city and return the stored row with its assigned id.
    ///
    /// The store accepts duplicates; deduplication is a screen-level concern.
    pub fn create(&self, city: &str) -> Result<SavedLocation, StoreError> {
        self.conn
            .execute(
                "INSERT INTO saved_locations (city) VALUES (?1)",
                params![city],
            )
            .map_err(StoreError::write)?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!("Saved location '{}' with ID: {}", city, id);

        Ok(SavedLocation {
            id,
            city: city.to_string(),
        })
    }

    /// List all saved locations in insertion order.
    pub fn list(&self) -> Result<Vec<SavedLocation>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, city FROM saved_locations ORDER BY id")
            .map_err(StoreError::read)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(SavedLocation {
                    id: row.get(0)?,
                    city: row.get(1)?,
                })
            })
            .map_err(StoreError::read)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::read)
    }

    /// Remove a saved location by id.
    ///
    /// Removing an id that is not present is a no-op, not an error.
    pub fn remove(&self, id: i64) -> Result<(), StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM saved_locations WHERE id = ?1", params![id])
            .map_err(StoreError::write)?;

        if affected == 0 {
            tracing::debug!("No saved location with ID: {}", id);
        } else {
            tracing::debug!("Removed saved location: {}", id);
        }
        Ok(())
    }

    /// Get the saved location count.
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM saved_locations", [], |row| row.get(0))
            .map_err(StoreError::read)?;
        Ok(count as usize)
    }
}
