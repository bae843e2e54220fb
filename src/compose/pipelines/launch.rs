//! Launcher shim pipeline
//!
//! Steam runs `<trampoline> <game argv...>`; this reads the settings, composes
//! the real command line and replaces the process with it. Every failure
//! degrades to running the game's own argv unchanged.

use std::ffi::OsString;
use std::path::Path;

use crate::compose::operations::{exec_argv, program_exists, write_launch_log};
use crate::compose::pure::Composer;
use crate::compose::types::{ComposeError, Composition};
use crate::settings::{Settings, load_settings};

/// Steps of a launch. `Exec` and `Fallback` are terminal: they only hand
/// control back when the process could not be replaced.
#[derive(Debug)]
pub enum LaunchStage {
    Parse,
    Compose(Settings),
    Exec(Composition),
    Fallback,
}

/// Extract the app id from an `AppId=<id>` argument
pub fn steam_app_id(argv: &[OsString]) -> Option<String> {
    argv.iter()
        .map(|arg| arg.to_string_lossy())
        .find_map(|arg| {
            arg.split_once("AppId=")
                .and_then(|(_, rest)| rest.split('=').next())
                .map(str::to_string)
        })
        .filter(|id| !id.is_empty())
}

pub struct Launch<'a> {
    pub base_argv: &'a [OsString],
    pub app_id: Option<String>,
    pub settings_path: &'a Path,
    pub launch_log: &'a Path,
    pub home: &'a Path,
}

impl<'a> Launch<'a> {
    pub fn new(base_argv: &'a [OsString], settings_path: &'a Path, launch_log: &'a Path, home: &'a Path) -> Self {
        Self {
            base_argv,
            app_id: steam_app_id(base_argv),
            settings_path,
            launch_log,
            home,
        }
    }

    /// Advance one stage. Terminal stages return `None` once exec fails for
    /// good.
    pub fn step(&self, stage: LaunchStage) -> Option<LaunchStage> {
        match stage {
            LaunchStage::Parse => match load_settings(self.settings_path) {
                Ok(settings) => Some(LaunchStage::Compose(settings)),
                Err(e) => {
                    log::warn!("{}", ComposeError::from(e));
                    write_launch_log(
                        self.launch_log,
                        self.app_id.as_deref(),
                        self.base_argv,
                        self.base_argv,
                    );
                    Some(LaunchStage::Fallback)
                }
            },
            LaunchStage::Compose(settings) => {
                let composition = self.compose(&settings);
                write_launch_log(
                    self.launch_log,
                    self.app_id.as_deref(),
                    self.base_argv,
                    &composition.argv,
                );
                if composition.argv.is_empty() {
                    log::warn!("Composition produced no command, running the original");
                    Some(LaunchStage::Fallback)
                } else {
                    Some(LaunchStage::Exec(composition))
                }
            }
            LaunchStage::Exec(composition) => {
                log::info!("Executing {:?}", composition.argv);
                let err = exec_argv(&composition.argv, &composition.env);
                log::error!("{}, running the original command", err);
                Some(LaunchStage::Fallback)
            }
            LaunchStage::Fallback => {
                let err = exec_argv(self.base_argv, &Default::default());
                log::error!("{}", err);
                None
            }
        }
    }

    pub fn compose(&self, settings: &Settings) -> Composition {
        let profile = self.app_id.as_deref().and_then(|id| settings.profile(id));
        let composition = Composer::new()
            .with_home(self.home.to_string_lossy())
            .with_program_check(program_exists)
            .compose(profile, &settings.launch_options, self.base_argv);

        for err in &composition.rule_errors {
            log::warn!(
                "App {}: {}, skipped",
                self.app_id.as_deref().unwrap_or("unknown"),
                err
            );
        }
        composition
    }

    /// Drive the stages to completion. Returns only when no command could be
    /// executed at all.
    pub fn run(&self) {
        let mut stage = LaunchStage::Parse;
        while let Some(next) = self.step(stage) {
            stage = next;
        }
    }
}
