//! VDF module type definitions

use std::path::PathBuf;

/// Key under which Steam stores per-game launch options
pub const LAUNCH_OPTIONS_KEY: &str = "LaunchOptions";

/// Indentation used for an inserted `LaunchOptions` line when no sibling key
/// can be sampled (app objects sit five levels deep in localconfig.vdf)
pub const DEFAULT_INDENT: &str = "\t\t\t\t\t";

/// Separators tried, in order, when looking for the literal `LaunchOptions` line
pub const SEPARATOR_VARIANTS: [&str; 3] = ["\t\t", "\t", "  "];

/// A brace-delimited object located inside the config text.
///
/// `start` is the byte offset of the opening `{`, `end` the byte offset of
/// its matching `}`. Both are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectSpan {
    pub start: usize,
    pub end: usize,
}

impl ObjectSpan {
    /// Full text of the object, braces included
    #[cfg(test)]
    pub fn text<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.start..=self.end]
    }

    /// Text strictly between the braces
    pub fn inner<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.start + 1..self.end]
    }
}

/// One game's object inside the `"apps"` section
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppEntry {
    /// Numeric key (4 to 10 digits)
    pub app_id: String,
    pub span: ObjectSpan,
    pub name: Option<String>,
    /// Only apps that show both `"cloud"` and `"last_sync_state"` are edited
    pub has_cloud_sync: bool,
    pub launch_options: Option<String>,
}

impl AppEntry {
    /// Name for log output, falling back to the app id
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("App {}", self.app_id),
        }
    }
}

/// A single planned change to the config text, always keyed to one app
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOperation {
    /// Swap one exact literal line for another. `offset` is where `old` was
    /// found inside the app's object.
    Replace {
        app_id: String,
        offset: usize,
        old: String,
        new: String,
    },
    /// Splice a complete new line in at `offset`
    Insert {
        app_id: String,
        offset: usize,
        text: String,
    },
}

impl EditOperation {
    pub fn offset(&self) -> usize {
        match self {
            EditOperation::Replace { offset, .. } | EditOperation::Insert { offset, .. } => *offset,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, EditOperation::Insert { .. })
    }
}

/// Summary of one editor pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Eligible apps (cloud-sync gate passed)
    pub apps_processed: usize,
    /// Eligible apps that already had a `LaunchOptions` key
    pub apps_with_launch_options: usize,
    pub replaced: usize,
    pub inserted: usize,
    /// Whether the file on disk was rewritten
    pub written: bool,
}

impl UpdateReport {
    pub fn modifications(&self) -> usize {
        self.replaced + self.inserted
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VdfError {
    #[error("section \"{0}\" not found")]
    SectionNotFound(String),

    #[error("object opened at offset {0} is never closed")]
    UnbalancedObject(usize),

    #[error("edited config rejected: {0}")]
    ValidationFailed(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VdfError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VdfError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, VdfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_text_includes_braces() {
        let buf = "\"a\" { \"b\" \"c\" }";
        let span = ObjectSpan { start: 4, end: 14 };
        assert_eq!(span.text(buf), "{ \"b\" \"c\" }");
        assert_eq!(span.inner(buf), " \"b\" \"c\" ");
    }

    #[test]
    fn display_name_falls_back_to_app_id() {
        let entry = AppEntry {
            app_id: "12345".to_string(),
            span: ObjectSpan { start: 0, end: 1 },
            name: None,
            has_cloud_sync: false,
            launch_options: None,
        };
        assert_eq!(entry.display_name(), "App 12345");
    }

    #[test]
    fn report_counts_modifications() {
        let report = UpdateReport {
            replaced: 2,
            inserted: 3,
            ..Default::default()
        };
        assert_eq!(report.modifications(), 5);
    }
}
