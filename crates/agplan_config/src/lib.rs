//! Parsing and validation of `agplan.toml` floorplanner settings.
//!
//! This crate reads the settings file and produces a strongly-typed
//! [`Settings`] holding the area-estimation constants, the communication
//! weight scheme, the solve policy, and the result validation threshold.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::SettingsError;
pub use loader::{load_settings, load_settings_from_str, SETTINGS_FILE};
pub use types::*;
