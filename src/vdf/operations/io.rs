use crate::vdf::types::{Result, VdfError};

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Read the whole config file.
///
/// The file must be valid UTF-8: a lossy decode would rewrite bytes outside
/// the edited fields on the next write.
pub fn read_config(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| VdfError::io(path, e))?;
    String::from_utf8(bytes).map_err(|e| {
        VdfError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })
}

fn temp_path(path: &Path) -> PathBuf {
    path.with_extension("vdf.tmp")
}

/// Write `contents` to a sibling temp file, then rename it over `path`.
pub fn write_config_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = temp_path(path);

    let write = || -> std::io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    };
    if let Err(e) = write() {
        let _ = fs::remove_file(&tmp);
        return Err(VdfError::io(&tmp, e));
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(VdfError::io(path, e));
    }

    log::debug!("Replaced {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// Bump the modification time to now so Steam notices the rewrite
pub fn touch_mtime(path: &Path) -> Result<()> {
    let file = File::options()
        .write(true)
        .open(path)
        .map_err(|e| VdfError::io(path, e))?;
    file.set_modified(SystemTime::now())
        .map_err(|e| VdfError::io(path, e))
}
