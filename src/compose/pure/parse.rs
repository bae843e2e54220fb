// Launch option string parsing (no I/O)

use crate::compose::types::{COMMAND_PLACEHOLDER, ParsedOption};

/// Whether a token is a `KEY=value` environment assignment.
///
/// The key must be non-empty and contain no `/`, so `/path/to/tool=x` stays a
/// command token. Flags such as `--config=x` are never assignments.
pub fn is_env_assignment(token: &str) -> bool {
    if token.starts_with('-') {
        return false;
    }
    match token.split_once('=') {
        Some((key, _)) => !key.is_empty() && !key.contains('/'),
        None => false,
    }
}

/// Whether a token is a game argument (`-novid`, `+fps_max`)
fn is_game_arg(token: &str) -> bool {
    token.starts_with('-') || token.starts_with('+')
}

/// Split a launch option string with shell quoting rules and classify its
/// tokens.
///
/// With `%command%` present, tokens before it are prefix (minus environment
/// assignments) and tokens after it are suffix. Without it, the first
/// `-`/`+` token and everything after it are game arguments (suffix), and the
/// remaining non-assignment tokens are prefix.
pub fn parse_launch_option(raw: &str) -> Result<ParsedOption, shell_words::ParseError> {
    if raw.trim().is_empty() {
        return Ok(ParsedOption::default());
    }

    let mut left = shell_words::split(raw)?;
    let placeholder = left.iter().position(|t| t == COMMAND_PLACEHOLDER);

    let right = match placeholder {
        Some(idx) => {
            let right = left.split_off(idx + 1);
            left.pop();
            right
        }
        None => match left.iter().position(|t| is_game_arg(t)) {
            Some(idx) => left.split_off(idx),
            None => Vec::new(),
        },
    };

    let mut parsed = ParsedOption {
        suffix: right,
        ..Default::default()
    };

    for token in left {
        if is_env_assignment(&token) {
            if let Some((key, value)) = token.split_once('=') {
                parsed.env.push((key.to_string(), value.to_string()));
            }
        } else {
            parsed.prefix.push(token);
        }
    }

    Ok(parsed)
}

/// Expand a leading `~` component to `home`
pub fn expand_home(token: &str, home: &str) -> String {
    if token == "~" {
        home.to_string()
    } else if let Some(rest) = token.strip_prefix("~/") {
        format!("{}/{}", home.trim_end_matches('/'), rest)
    } else {
        token.to_string()
    }
}
