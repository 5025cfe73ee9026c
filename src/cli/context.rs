use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::core::errors::{Result, TrackerError};

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static USER_OVERRIDE: OnceLock<Option<String>> = OnceLock::new();

/// Initialize the global data directory and actor.
/// If `custom_dir` is provided, uses that path; otherwise defaults to `.affitrack`.
pub fn init(custom_dir: Option<&str>, user: Option<&str>) {
    let dir = custom_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".affitrack"));
    let _ = DATA_DIR.set(dir);
    let _ = USER_OVERRIDE.set(user.map(str::to_string));
}

/// Get the current data directory path.
pub fn data_dir() -> &'static Path {
    DATA_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(".affitrack"))
}

/// Actor given with `--user` / `AFFITRACK_USER`, if any.
pub fn user_override() -> Option<&'static str> {
    USER_OVERRIDE.get().and_then(|u| u.as_deref())
}

/// Fail with a pointer to `affitrack init` when the data directory is missing.
pub fn require_initialized() -> Result<&'static Path> {
    let dir = data_dir();
    if !dir.exists() {
        return Err(TrackerError::InvalidConfig {
            detail: "affitrack not initialized. Run 'affitrack init' first.".into(),
        });
    }
    Ok(dir)
}

/// Ensure a configured file name stays inside the data directory.
pub fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if bad {
        return Err(TrackerError::InvalidConfig {
            detail: format!("Invalid {what} name '{name}': must be a plain file name"),
        });
    }
    Ok(())
}
