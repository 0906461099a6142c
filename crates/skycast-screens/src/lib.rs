//! Screen controllers for Skycast.
//!
//! Each screen is a plain struct holding transient view state plus the
//! collaborators it talks to; rendering is out of scope. `App` is the
//! composition root that builds the shared services from a `Config` and
//! hands them to the screens.

pub mod app;
pub mod current_location;
pub mod saved;
pub mod search;

pub use app::App;
pub use current_location::CurrentLocationScreen;
pub use saved::{SavedLocationView, SavedLocationsScreen};
pub use search::{SaveOutcome, SearchScreen, MAX_SAVED_LOCATIONS};
