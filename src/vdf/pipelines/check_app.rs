//! Read-only lookup of a single app's launch options

use std::path::Path;

use crate::vdf::operations::read_config;
use crate::vdf::pure::{find_app, read_field};
use crate::vdf::types::LAUNCH_OPTIONS_KEY;

/// Whether the app has a `LaunchOptions` key, and its current value.
///
/// Any failure (unreadable file, unknown app, unclosed object) reads as
/// `(false, "")`.
pub fn check_app_has_launch_options(path: &Path, app_id: &str) -> (bool, String) {
    let buffer = match read_config(path) {
        Ok(buffer) => buffer,
        Err(e) => {
            log::error!("Error checking app {}: {}", app_id, e);
            return (false, String::new());
        }
    };

    find_app(&buffer, app_id)
        .and_then(|span| read_field(&buffer, span, LAUNCH_OPTIONS_KEY))
        .map(|value| (true, value))
        .unwrap_or_default()
}
