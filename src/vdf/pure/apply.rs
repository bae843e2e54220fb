// Applying planned edits and validating the result (no I/O)

use super::scanner::{braces_balanced, count_braces};
use crate::vdf::types::{EditOperation, Result, VdfError};

/// Apply the planned edits to a copy of the buffer.
///
/// With any insert in the batch, operations are applied from the highest
/// offset down so earlier offsets stay valid. A replace-only batch is applied
/// in discovery order, each substituting the first occurrence at or after its
/// (shifted) offset.
pub fn apply_edits(buffer: &str, ops: &[EditOperation]) -> String {
    let mut out = buffer.to_string();

    if ops.iter().any(EditOperation::is_insert) {
        let mut ordered: Vec<&EditOperation> = ops.iter().collect();
        ordered.sort_by(|a, b| b.offset().cmp(&a.offset()));

        for op in ordered {
            match op {
                EditOperation::Insert { offset, text, .. } => out.insert_str(*offset, text),
                EditOperation::Replace { app_id, offset, old, new } => {
                    if !replace_first_from(&mut out, *offset, old, new) {
                        log::warn!("App ID {}: LaunchOptions line moved, not replaced", app_id);
                    }
                }
            }
        }
    } else {
        let mut shift: isize = 0;
        for op in ops {
            if let EditOperation::Replace { app_id, offset, old, new } = op {
                let from = offset.saturating_add_signed(shift);
                if replace_first_from(&mut out, from, old, new) {
                    shift += new.len() as isize - old.len() as isize;
                } else {
                    log::warn!("App ID {}: LaunchOptions line moved, not replaced", app_id);
                }
            }
        }
    }

    out
}

/// Replace the first occurrence of `old` at or after `from`. Returns whether
/// anything was replaced.
fn replace_first_from(buffer: &mut String, from: usize, old: &str, new: &str) -> bool {
    let Some(tail) = buffer.get(from..) else {
        return false;
    };
    match tail.find(old) {
        Some(idx) => {
            let at = from + idx;
            buffer.replace_range(at..at + old.len(), new);
            true
        }
        None => false,
    }
}

/// Reject an edited buffer that lost more than 10% of its length or whose
/// braces no longer balance.
pub fn validate_edit(original: &str, edited: &str) -> Result<()> {
    if edited.len() * 10 < original.len() * 9 {
        return Err(VdfError::ValidationFailed(format!(
            "new size {} is less than 90% of original size {}",
            edited.len(),
            original.len()
        )));
    }

    if !braces_balanced(edited) {
        let (open, close) = count_braces(edited);
        return Err(VdfError::ValidationFailed(format!(
            "brace mismatch: {} opening, {} closing",
            open, close
        )));
    }

    Ok(())
}
