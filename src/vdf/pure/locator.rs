// Section and app-object location (no I/O)

use std::sync::LazyLock;

use regex::Regex;

use super::scanner::find_matching_brace;
use crate::vdf::types::{ObjectSpan, Result, VdfError};

/// A quoted run of 4-10 ASCII digits opening an object, at the start of a line
static APP_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*"([0-9]{4,10})"\s*\{"#).expect("valid app key pattern"));

/// Locate the object stored under the first textual occurrence of `"<key>"`.
pub fn locate_object(buffer: &str, key: &str) -> Result<ObjectSpan> {
    let needle = format!("\"{}\"", key);
    let key_pos = buffer
        .find(&needle)
        .ok_or_else(|| VdfError::SectionNotFound(key.to_string()))?;

    let after_key = key_pos + needle.len();
    let open = buffer[after_key..]
        .find('{')
        .map(|i| after_key + i)
        .ok_or_else(|| VdfError::SectionNotFound(key.to_string()))?;

    let end = find_matching_brace(buffer, open)?;
    Ok(ObjectSpan { start: open, end })
}

/// Locate a single app object by id anywhere in the buffer
pub fn find_app(buffer: &str, app_id: &str) -> Option<ObjectSpan> {
    let pattern = format!(r#""{}"\s*\{{"#, regex::escape(app_id));
    let re = Regex::new(&pattern).ok()?;
    let m = re.find(buffer)?;
    let open = m.end() - 1;
    let end = find_matching_brace(buffer, open).ok()?;
    Some(ObjectSpan { start: open, end })
}

/// Walks the numbered child objects of a parent object, in buffer order.
///
/// Each step resumes strictly past the previous child's closing brace, and
/// iteration stops at the first position where no further numeric key exists
/// before the parent's closing brace, or where a child fails to close inside
/// the parent.
pub struct AppIter<'a> {
    buffer: &'a str,
    parent: ObjectSpan,
    pos: usize,
}

impl<'a> AppIter<'a> {
    pub fn new(buffer: &'a str, parent: ObjectSpan) -> Self {
        Self {
            buffer,
            parent,
            pos: parent.start + 1,
        }
    }
}

impl Iterator for AppIter<'_> {
    type Item = (String, ObjectSpan);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.parent.end {
            return None;
        }

        let window = &self.buffer[self.pos..self.parent.end];
        let caps = APP_KEY.captures(window)?;
        let whole = caps.get(0)?;
        let app_id = caps.get(1)?.as_str().to_string();

        let open = self.pos + whole.end() - 1;
        let close = match find_matching_brace(self.buffer, open) {
            Ok(close) if close < self.parent.end => close,
            _ => {
                self.pos = self.parent.end;
                return None;
            }
        };

        self.pos = close + 1;
        Some((app_id, ObjectSpan { start: open, end: close }))
    }
}
