use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;

use crate::core::errors::{Result, TrackerError};

/// Lock file created inside the data directory.
pub const LOCK_FILE: &str = ".lock";

/// Exclusive advisory lock over a data directory.
///
/// A CLI session loads `data.json` and `history.json`, changes them and
/// writes them back. Holding this lock from load to the last write keeps
/// two sessions from interleaving. Released on drop.
#[derive(Debug)]
pub struct DataDirLock {
    file: File,
    path: PathBuf,
}

impl DataDirLock {
    /// Block until no other session holds `data_dir`.
    pub fn acquire(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| TrackerError::LockError {
                detail: format!("Cannot open {}: {e}", path.display()),
            })?;

        file.lock_exclusive().map_err(|e| TrackerError::LockError {
            detail: format!("{}: {e}", path.display()),
        })?;

        tracing::debug!(path = %path.display(), "data directory locked");
        Ok(Self { file, path })
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to unlock data directory");
        }
    }
}
