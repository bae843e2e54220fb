use crate::settings::types::{Result, Settings, SettingsError};

use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::Path;

/// Read the settings document fresh from disk
pub fn load_settings(path: &Path) -> Result<Settings> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SettingsError::Missing(path.to_path_buf()),
        _ => SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the document as pretty JSON through a temp file and rename
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let io_err = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_vec_pretty(settings).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(io_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    Ok(())
}
