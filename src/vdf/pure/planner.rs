// Edit planning for LaunchOptions injection (no I/O)

use std::sync::LazyLock;

use regex::Regex;

use crate::vdf::types::{
    AppEntry, DEFAULT_INDENT, EditOperation, LAUNCH_OPTIONS_KEY, SEPARATOR_VARIANTS,
};

/// Leading indentation of a line that starts with a quoted key
static KEY_INDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^([ \t]+)""#).expect("valid indent pattern"));

/// What the planner decided for one app
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Not cloud-synced, left alone
    Ineligible,
    /// Already carries the desired value
    Unchanged,
    /// `LaunchOptions` exists but none of the separator variants matched verbatim
    Unmatched,
    Edit(EditOperation),
}

/// Decide the edit for a single app.
pub fn plan_app(buffer: &str, app: &AppEntry, desired: &str) -> PlanOutcome {
    if !app.has_cloud_sync {
        return PlanOutcome::Ineligible;
    }

    match &app.launch_options {
        Some(current) if current.contains(desired) => PlanOutcome::Unchanged,
        Some(current) => plan_replace(buffer, app, current, desired),
        None => PlanOutcome::Edit(plan_insert(buffer, app, desired)),
    }
}

fn plan_replace(buffer: &str, app: &AppEntry, current: &str, desired: &str) -> PlanOutcome {
    let inner = app.span.inner(buffer);
    let inner_start = app.span.start + 1;

    for sep in SEPARATOR_VARIANTS {
        let old = format!("\"{}\"{}\"{}\"", LAUNCH_OPTIONS_KEY, sep, current);
        if let Some(idx) = inner.find(&old) {
            return PlanOutcome::Edit(EditOperation::Replace {
                app_id: app.app_id.clone(),
                offset: inner_start + idx,
                old,
                new: format!("\"{}\"{}\"{}\"", LAUNCH_OPTIONS_KEY, sep, desired),
            });
        }
    }

    PlanOutcome::Unmatched
}

fn plan_insert(buffer: &str, app: &AppEntry, desired: &str) -> EditOperation {
    let open = app.span.start;
    let newline = buffer[open..app.span.end].find('\n').map(|i| open + i);

    let (offset, text) = match newline {
        Some(nl) => {
            let line_start = nl + 1;
            let line_end = buffer[line_start..]
                .find('\n')
                .map(|i| line_start + i)
                .unwrap_or(buffer.len());
            let indent = sample_indent(&buffer[line_start..line_end]);
            (line_start, launch_options_line(indent, desired))
        }
        // Single-line object: open a new line right after the brace
        None => (
            open + 1,
            format!("\n{}", launch_options_line(DEFAULT_INDENT, desired)),
        ),
    };

    EditOperation::Insert {
        app_id: app.app_id.clone(),
        offset,
        text,
    }
}

/// Indentation of a sibling key line, or the fixed default
pub fn sample_indent(line: &str) -> &str {
    KEY_INDENT
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_INDENT)
}

pub fn launch_options_line(indent: &str, value: &str) -> String {
    format!("{}\"{}\"\t\t\"{}\"\n", indent, LAUNCH_OPTIONS_KEY, value)
}
