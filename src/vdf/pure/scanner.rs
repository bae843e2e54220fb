// Brace matching over raw config text (no I/O)

use crate::vdf::types::{Result, VdfError};

/// Find the `}` matching the `{` at `open`.
///
/// Linear depth-counted scan; braces inside quoted strings are not special.
/// Returns `UnbalancedObject` when the buffer ends before depth returns to 0
/// or when `open` is not an opening brace.
pub fn find_matching_brace(buffer: &str, open: usize) -> Result<usize> {
    let bytes = buffer.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return Err(VdfError::UnbalancedObject(open));
    }

    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }

    Err(VdfError::UnbalancedObject(open))
}

/// Count of (`{`, `}`) in the text
pub fn count_braces(text: &str) -> (usize, usize) {
    text.bytes().fold((0, 0), |(open, close), b| match b {
        b'{' => (open + 1, close),
        b'}' => (open, close + 1),
        _ => (open, close),
    })
}

pub fn braces_balanced(text: &str) -> bool {
    let (open, close) = count_braces(text);
    open == close
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── find_matching_brace ─────────────────────────────────────

    #[test]
    fn flat_object() {
        let buf = "{ \"a\" \"b\" }";
        assert_eq!(find_matching_brace(buf, 0).unwrap(), buf.len() - 1);
    }

    #[test]
    fn nested_objects_skip_inner_close() {
        let buf = "x { { } { { } } } y";
        assert_eq!(find_matching_brace(buf, 2).unwrap(), 16);
        assert_eq!(find_matching_brace(buf, 4).unwrap(), 6);
        assert_eq!(find_matching_brace(buf, 8).unwrap(), 14);
    }

    #[test]
    fn runs_off_the_end() {
        let buf = "{ { }";
        assert!(matches!(
            find_matching_brace(buf, 0),
            Err(VdfError::UnbalancedObject(0))
        ));
    }

    #[test]
    fn start_not_on_brace() {
        assert!(find_matching_brace("ab{}", 0).is_err());
        assert!(find_matching_brace("", 0).is_err());
    }

    // ── count_braces ────────────────────────────────────────────

    #[test]
    fn counts_both_kinds() {
        assert_eq!(count_braces("{{}"), (2, 1));
        assert!(!braces_balanced("{{}"));
        assert!(braces_balanced("{ \"a\" { } }"));
        assert!(braces_balanced("no braces"));
    }
}
