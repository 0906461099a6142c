//! Saved location data model.

use serde::{Deserialize, Serialize};

/// A city the user has saved for quick weather lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedLocation {
    /// Row id assigned by the store on insert
    pub id: i64,
    /// City name as the user entered it
    pub city: String,
}
