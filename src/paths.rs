use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

pub static PATH_HOME: LazyLock<PathBuf> = LazyLock::new(|| {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"))
});

/// Folder holding the settings document, trampoline script and launch log
pub static PATH_DLO: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Some(dlo_home) = env::var_os("DLO_HOME") {
        return PathBuf::from(dlo_home);
    }
    PATH_HOME.join("dlo")
});

pub static PATH_SETTINGS: LazyLock<PathBuf> = LazyLock::new(|| PATH_DLO.join("settings.json"));

pub static PATH_LAUNCH_LOG: LazyLock<PathBuf> = LazyLock::new(|| PATH_DLO.join("debug.log"));

/// Shell script Steam runs in place of the game
pub static PATH_RUN_SCRIPT: LazyLock<PathBuf> = LazyLock::new(|| PATH_DLO.join("run"));
