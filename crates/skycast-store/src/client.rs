//! Async client over the saved location store.
//!
//! This module provides `LocationClient`, which wraps the synchronous SQLite
//! store with an async interface so screen controllers never block the
//! runtime on database work.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use skycast_core::StoreError;

use crate::store::SavedLocationStore;
use crate::types::SavedLocation;

/// Async handle to saved location storage.
///
/// Cloning is cheap; clones share the same underlying store.
#[derive(Clone)]
pub struct LocationClient {
    store: Arc<Mutex<SavedLocationStore>>,
}

impl LocationClient {
    /// Wrap an already opened store.
    pub fn new(store: SavedLocationStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Open a file-backed store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self::new(SavedLocationStore::open(path)?))
    }

    /// Open an in-memory store (tests and previews).
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self::new(SavedLocationStore::in_memory()?))
    }

    /// Persist a city and return the stored row with its assigned id.
    pub async fn create(&self, city: &str) -> Result<SavedLocation, StoreError> {
        let store = self.store.clone();
        let city = city.to_string();
        tokio::task::spawn_blocking(move || store.lock().create(&city))
            .await
            .map_err(StoreError::write)?
    }

    /// List all saved locations in insertion order.
    pub async fn list(&self) -> Result<Vec<SavedLocation>, StoreError> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.lock().list())
            .await
            .map_err(StoreError::read)?
    }

    /// Remove a saved location by id. Removing an absent id is a no-op.
    pub async fn remove(&self, id: i64) -> Result<(), StoreError> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.lock().remove(id))
            .await
            .map_err(StoreError::write)?
    }

    /// Get the saved location count.
    pub async fn count(&self) -> Result<usize, StoreError> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.lock().count())
            .await
            .map_err(StoreError::read)?
    }
}

impl std::fmt::Debug for LocationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LocationClient").finish()
    }
}
