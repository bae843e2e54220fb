//! Settings document types
//!
//! The document is owned by the plugin frontend; this crate reads it on every
//! launch and only writes it to seed an empty one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One user-defined launch option with its on/off command templates
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchOptionRule {
    pub id: String,
    /// Display name shown by the frontend
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "on", alias = "onCommand", default)]
    pub on_command: String,
    #[serde(rename = "off", alias = "offCommand", default)]
    pub off_command: String,
    /// State used for apps whose profile says nothing about this rule
    #[serde(default)]
    pub enable_globally: bool,
}

impl LaunchOptionRule {
    pub fn is_enabled(&self, profile: Option<&Profile>) -> bool {
        profile
            .and_then(|p| p.state.get(&self.id))
            .copied()
            .unwrap_or(self.enable_globally)
    }

    /// The command template selected by the enablement state
    pub fn command(&self, enabled: bool) -> &str {
        if enabled {
            &self.on_command
        } else {
            &self.off_command
        }
    }
}

/// Per-app rule state
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub state: HashMap<String, bool>,
    /// The app's own launch options from before the trampoline replaced them
    #[serde(default)]
    pub original_launch_options: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Keyed by Steam app id
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub launch_options: Vec<LaunchOptionRule>,
}

impl Settings {
    pub fn profile(&self, app_id: &str) -> Option<&Profile> {
        self.profiles.get(app_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SettingsError>;
