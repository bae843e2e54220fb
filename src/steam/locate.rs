//! Steam installation and user config discovery
//!
//! Uses steamlocate first, then a fixed list of well-known install roots.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::SteamError;
use crate::paths::PATH_HOME;

/// Well-known Steam roots, in lookup order
pub fn steam_candidates(home: &Path) -> Vec<PathBuf> {
    vec![
        home.join(".steam/steam"),
        home.join(".local/share/Steam"),
        PathBuf::from("/usr/share/steam"),
        home.join(".steam/root"),
        home.join("snap/steam/common/.steam/steam"),
        PathBuf::from("/var/lib/flatpak/app/com.valvesoftware.Steam/home/.steam/steam"),
        home.join(".var/app/com.valvesoftware.Steam/home/.steam/steam"),
    ]
}

/// Find the Steam installation root
pub fn find_steam_path() -> Result<PathBuf, SteamError> {
    if let Ok(steam_dir) = steamlocate::SteamDir::locate() {
        let path = steam_dir.path().to_path_buf();
        if path.exists() {
            return Ok(path);
        }
    }

    steam_candidates(&PATH_HOME)
        .into_iter()
        .find(|p| p.exists())
        .ok_or(SteamError::NotInstalled)
}

/// The `localconfig.vdf` of the most recently modified numeric user directory
pub fn find_localconfig_vdf(steam_path: &Path) -> Result<PathBuf, SteamError> {
    let userdata = steam_path.join("userdata");
    if !userdata.is_dir() {
        return Err(SteamError::NoUserData(userdata));
    }

    let newest = walkdir::WalkDir::new(&userdata)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            !name.is_empty() && name.chars().all(|c| c.is_ascii_digit())
        })
        .max_by_key(|entry| {
            entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH)
        })
        .ok_or_else(|| SteamError::NoUsers(userdata.clone()))?;

    let localconfig = newest.path().join("config/localconfig.vdf");
    if !localconfig.exists() {
        return Err(SteamError::ConfigMissing(localconfig));
    }
    Ok(localconfig)
}
