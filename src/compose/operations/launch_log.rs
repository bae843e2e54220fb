//! Per-launch debug record

use std::ffi::OsString;
use std::fmt::Write as _;
use std::path::Path;

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

fn write_args(out: &mut String, args: &[OsString]) {
    for (i, arg) in args.iter().enumerate() {
        let _ = writeln!(out, "Arg {}: {}", i, arg.to_string_lossy());
    }
    let _ = writeln!(out, "{}\n", "-".repeat(40));
}

/// Render the received and composed command lines
pub fn format_launch_log(
    app_id: Option<&str>,
    received: &[OsString],
    composed: &[OsString],
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "--- {} Launch Attempt for app: {} ---",
        timestamp(),
        app_id.unwrap_or("unknown")
    );
    let _ = writeln!(out, "Full Command List: {:?}\n", received);
    write_args(&mut out, received);

    let _ = writeln!(out, "Executable: {:?}\n", composed);
    write_args(&mut out, composed);
    out
}

/// Overwrite the launch log; failures are only logged
pub fn write_launch_log(
    path: &Path,
    app_id: Option<&str>,
    received: &[OsString],
    composed: &[OsString],
) {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = std::fs::write(path, format_launch_log(app_id, received, composed)) {
        log::debug!("Could not write launch log {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<OsString> {
        items.iter().map(OsString::from).collect()
    }

    #[test]
    fn lists_both_command_lines() {
        let received = args(&["/game", "AppId=620"]);
        let composed = args(&["mangohud", "/game", "AppId=620"]);
        let log = format_launch_log(Some("620"), &received, &composed);

        assert!(log.contains("Launch Attempt for app: 620 ---"));
        assert!(log.contains("Arg 1: AppId=620"));
        assert!(log.contains("Arg 0: mangohud"));
        assert!(log.contains("Executable: [\"mangohud\", \"/game\", \"AppId=620\"]"));
    }

    #[test]
    fn header_carries_readable_local_time() {
        let log = format_launch_log(None, &[], &[]);
        let header = log.lines().next().unwrap();
        let stamp = header
            .strip_prefix("--- ")
            .and_then(|rest| rest.split(" Launch Attempt").next())
            .unwrap();

        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S%.3f").is_ok());
        assert!(header.ends_with("for app: unknown ---"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_args_are_rendered_lossily() {
        use std::os::unix::ffi::OsStringExt;

        let received = vec![OsString::from_vec(b"caf\xe9".to_vec())];
        let log = format_launch_log(Some("1"), &received, &received);
        assert!(log.contains("Arg 0: caf\u{fffd}"));
    }

    #[test]
    fn write_is_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        write_launch_log(&path, Some("1"), &args(&["a"]), &args(&["a"]));
        write_launch_log(&path, Some("2"), &args(&["b"]), &args(&["b"]));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("for app: 2"));
        assert!(!contents.contains("for app: 1"));
    }
}
