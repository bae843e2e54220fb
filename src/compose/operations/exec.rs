//! Process replacement

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::compose::types::ComposeError;

/// Whether a prefix command can be run: on `PATH` or an existing file
pub fn program_exists(program: &str) -> bool {
    which::which(program).is_ok() || Path::new(program).is_file()
}

fn build_command(argv: &[OsString], env: &BTreeMap<String, String>) -> Result<Command, ComposeError> {
    let (program, args) = argv.split_first().ok_or(ComposeError::EmptyCommand)?;
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.envs(env);
    Ok(cmd)
}

/// Replace the current process with `argv`, on top of the inherited
/// environment plus `env`.
///
/// Only returns on failure.
#[cfg(unix)]
pub fn exec_argv(argv: &[OsString], env: &BTreeMap<String, String>) -> ComposeError {
    use std::os::unix::process::CommandExt;

    let mut cmd = match build_command(argv, env) {
        Ok(cmd) => cmd,
        Err(e) => return e,
    };
    let source = cmd.exec();
    ComposeError::Exec {
        program: PathBuf::from(cmd.get_program()),
        source,
    }
}

/// Without process-image replacement: spawn, wait, and exit with the
/// child's status.
///
/// Only returns on failure.
#[cfg(not(unix))]
pub fn exec_argv(argv: &[OsString], env: &BTreeMap<String, String>) -> ComposeError {
    let mut cmd = match build_command(argv, env) {
        Ok(cmd) => cmd,
        Err(e) => return e,
    };
    match cmd.status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(source) => ComposeError::Exec {
            program: PathBuf::from(cmd.get_program()),
            source,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_argv_is_empty_command() {
        let err = exec_argv(&[], &BTreeMap::new());
        assert!(matches!(err, ComposeError::EmptyCommand));
    }

    #[test]
    fn missing_program_is_exec_error() {
        let argv = vec![OsString::from("/nonexistent/dlo-test-binary")];
        let err = exec_argv(&argv, &BTreeMap::new());
        assert!(matches!(err, ComposeError::Exec { .. }));
    }

    #[test]
    fn build_command_sets_args_and_env() {
        let mut env = BTreeMap::new();
        env.insert("MANGOHUD".to_string(), "1".to_string());
        let argv = vec![OsString::from("mangohud"), OsString::from("/game")];

        let cmd = build_command(&argv, &env).unwrap();

        assert_eq!(cmd.get_program(), "mangohud");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["/game"]);
        let envs: Vec<_> = cmd.get_envs().collect();
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].0, "MANGOHUD");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_arguments_are_kept() {
        use std::os::unix::ffi::OsStringExt;

        let odd = OsString::from_vec(b"caf\xe9".to_vec());
        let argv = vec![OsString::from("/bin/echo"), odd.clone()];

        let cmd = build_command(&argv, &BTreeMap::new()).unwrap();

        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec![odd.as_os_str()]);
    }

    #[test]
    fn program_lookup() {
        assert!(program_exists("sh"));
        assert!(!program_exists("dlo-definitely-not-a-program"));
    }
}
