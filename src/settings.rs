//! Settings module - the launch option rules and per-app profiles
//!
//! ## Module Structure
//! - `types.rs`: Serde types for the settings document
//! - `operations/`: Loading and saving the document

mod operations;
mod types;

pub use operations::{load_settings, save_settings};
pub use types::{LaunchOptionRule, Profile, Settings, SettingsError};
