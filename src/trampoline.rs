//! Trampoline script installation
//!
//! Steam's `LaunchOptions` can only hold a command line, so the trampoline
//! is a tiny shell script that hands the game argv to `dlo run`.

use std::fs;
use std::path::Path;

use crate::compose::pure::is_env_assignment;
use crate::settings::{Settings, SettingsError, save_settings};

/// The `LaunchOptions` value pointing Steam at the script.
///
/// Uses the `~/` short form when the script lives under `home`.
pub fn trampoline_command(script: &Path, home: &Path) -> String {
    match script.strip_prefix(home) {
        Ok(rel) if home != Path::new("/") => format!("~/{} %command%", rel.display()),
        _ => format!("{} %command%", script.display()),
    }
}

pub fn script_contents(dlo_binary: &Path) -> String {
    format!(
        "#!/bin/bash\nexec \"{}\" run \"$@\"\n",
        dlo_binary.display()
    )
}

/// Write the run script and make it executable for everyone
pub fn install_script(script: &Path, dlo_binary: &Path) -> std::io::Result<()> {
    if let Some(parent) = script.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(script, script_contents(dlo_binary))?;
    make_executable(script)
}

#[cfg(unix)]
fn make_executable(script: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(script)?.permissions();
    perms.set_mode(perms.mode() | 0o111);
    fs::set_permissions(script, perms)
}

/// No execute bits to set
#[cfg(not(unix))]
fn make_executable(_script: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Create an empty settings document unless one exists
pub fn seed_settings(path: &Path) -> Result<bool, SettingsError> {
    if path.exists() {
        return Ok(false);
    }
    save_settings(path, &Settings::default())?;
    Ok(true)
}

/// A trampoline value must stay a single plain command; quotes would break
/// the VDF string it is stored in.
pub fn validate_trampoline(command: &str) -> Result<(), String> {
    if command.contains('"') {
        return Err("launch option must not contain double quotes".to_string());
    }
    if command.trim().is_empty() || is_env_assignment(command.trim()) {
        return Err(format!("'{}' is not a command", command));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn short_form_under_home() {
        let cmd = trampoline_command(Path::new("/home/deck/dlo/run"), Path::new("/home/deck"));
        assert_eq!(cmd, "~/dlo/run %command%");
    }

    #[test]
    fn absolute_form_elsewhere() {
        let cmd = trampoline_command(Path::new("/opt/dlo/run"), Path::new("/home/deck"));
        assert_eq!(cmd, "/opt/dlo/run %command%");
    }

    #[test]
    fn script_forwards_all_arguments() {
        let contents = script_contents(Path::new("/usr/bin/dlo"));
        assert_eq!(contents, "#!/bin/bash\nexec \"/usr/bin/dlo\" run \"$@\"\n");
    }

    #[cfg(unix)]
    #[test]
    fn installed_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("dlo/run");
        install_script(&script, &PathBuf::from("/usr/bin/dlo")).unwrap();

        let mode = fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
        assert!(fs::read_to_string(&script).unwrap().starts_with("#!/bin/bash\n"));
    }

    #[cfg(unix)]
    #[test]
    fn existing_mode_bits_are_kept() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("run");
        fs::write(&script, "").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o640)).unwrap();

        make_executable(&script).unwrap();

        assert_eq!(fs::metadata(&script).unwrap().permissions().mode() & 0o777, 0o751);
    }

    #[test]
    fn seeds_settings_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert!(seed_settings(&path).unwrap());
        fs::write(&path, "{\"launchOptions\": []}").unwrap();
        assert!(!seed_settings(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"launchOptions\": []}");
    }

    #[test]
    fn trampoline_validation() {
        assert!(validate_trampoline("~/dlo/run %command%").is_ok());
        assert!(validate_trampoline("say \"hi\"").is_err());
        assert!(validate_trampoline("  ").is_err());
        assert!(validate_trampoline("FOO=1").is_err());
    }
}
