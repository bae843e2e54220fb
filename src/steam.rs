//! Steam discovery - where the install and the user's localconfig.vdf live

use std::path::PathBuf;

mod locate;

pub use locate::{find_localconfig_vdf, find_steam_path};

#[derive(Debug, thiserror::Error)]
pub enum SteamError {
    #[error("Steam installation not found")]
    NotInstalled,

    #[error("Steam userdata directory not found at: {}", .0.display())]
    NoUserData(PathBuf),

    #[error("No Steam user directories found in {}", .0.display())]
    NoUsers(PathBuf),

    #[error("localconfig.vdf not found at: {}", .0.display())]
    ConfigMissing(PathBuf),
}
