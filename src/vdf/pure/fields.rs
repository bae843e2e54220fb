// Scalar field extraction restricted to an object span (no I/O)

use regex::Regex;

use crate::vdf::types::{AppEntry, LAUNCH_OPTIONS_KEY, ObjectSpan};

/// Read `"<field>" "<value>"` from inside the object.
///
/// Values are plain double-quoted strings; embedded quotes are not supported.
pub fn read_field(buffer: &str, span: ObjectSpan, field: &str) -> Option<String> {
    let pattern = format!(r#""{}"\s+"([^"]*)""#, regex::escape(field));
    let re = Regex::new(&pattern).ok()?;
    re.captures(span.inner(buffer))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whether the quoted key appears anywhere inside the object
pub fn has_key(buffer: &str, span: ObjectSpan, key: &str) -> bool {
    span.inner(buffer).contains(&format!("\"{}\"", key))
}

/// Build the app view used by the edit planner
pub fn app_entry(buffer: &str, app_id: &str, span: ObjectSpan) -> AppEntry {
    let has_cloud_sync = has_key(buffer, span, "cloud") && has_key(buffer, span, "last_sync_state");

    AppEntry {
        app_id: app_id.to_string(),
        span,
        name: read_field(buffer, span, "name").filter(|n| !n.is_empty()),
        has_cloud_sync,
        launch_options: read_field(buffer, span, LAUNCH_OPTIONS_KEY),
    }
}
