//! Compose module type definitions

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::settings::SettingsError;

/// Placeholder Steam replaces with the game's own command line
pub const COMMAND_PLACEHOLDER: &str = "%command%";

/// Separator placed between consecutive prefix commands
pub const PREFIX_SEPARATOR: &str = "--";

/// Rule id used when reporting a problem with the preserved original options
pub const ORIGINAL_OPTIONS_ID: &str = "originalLaunchOptions";

/// One launch option string split into its parts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedOption {
    /// `KEY=value` assignments, in order of appearance
    pub env: Vec<(String, String)>,
    /// Tokens that go in front of the game command
    pub prefix: Vec<String>,
    /// Tokens that go after the game command
    pub suffix: Vec<String>,
}

#[cfg(test)]
impl ParsedOption {
    pub fn is_empty(&self) -> bool {
        self.env.is_empty() && self.prefix.is_empty() && self.suffix.is_empty()
    }
}

/// The final command line and the environment to run it with
#[derive(Debug, Default)]
pub struct Composition {
    /// Last assignment for a key wins
    pub env: BTreeMap<String, String>,
    /// Game arguments are carried as-is; they need not be UTF-8
    pub argv: Vec<OsString>,
    /// Rules that were skipped because their command could not be parsed
    pub rule_errors: Vec<ComposeError>,
}

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("launch option '{rule_id}' could not be parsed: {source}")]
    RuleParse {
        rule_id: String,
        #[source]
        source: shell_words::ParseError,
    },

    #[error("settings unavailable: {0}")]
    SettingsUnavailable(#[from] SettingsError),

    #[error("nothing to execute")]
    EmptyCommand,

    #[error("failed to execute {}: {source}", program.display())]
    Exec {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
