use std::path::{Path, PathBuf};

use crate::adapters::stores::json_file_store::write_atomic;
use crate::core::errors::{Result, TrackerError};
use crate::core::models::action_record::ActionRecord;
use crate::core::traits::history_store::HistoryStore;

/// Keeps the action history in a JSON array file between CLI runs.
///
/// The file is only a hand-off between processes. It is written after the
/// command that changed the history finishes, never in the same step as
/// the entity mutation itself.
pub struct JsonHistoryFile {
    path: PathBuf,
}

impl JsonHistoryFile {
    /// Create a history file handle for `{data_dir}/{file_name}`.
    pub fn new(data_dir: &Path, file_name: &str) -> Self {
        Self {
            path: data_dir.join(file_name),
        }
    }

    /// Create a handle from the `[history]` config section, falling back to
    /// `history.json` when the section is missing.
    pub fn from_config(
        data_dir: &Path,
        history_section: Option<&crate::config::app_config::HistorySection>,
    ) -> Self {
        let file = history_section
            .map(|h| h.file.as_str())
            .unwrap_or(crate::config::app_config::DEFAULT_HISTORY_FILE);
        Self::new(data_dir, file)
    }
}

impl HistoryStore for JsonHistoryFile {
    fn load(&self) -> Result<Vec<ActionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| TrackerError::HistoryError {
                detail: format!("Cannot read {}: {e}", self.path.display()),
            })?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| TrackerError::HistoryError {
            detail: format!("Malformed history file {}: {e}", self.path.display()),
        })
    }

    fn save(&self, records: &[ActionRecord]) -> Result<()> {
        write_atomic(&self.path, records).map_err(|e| TrackerError::HistoryError {
            detail: format!("Cannot write {}: {e}", self.path.display()),
        })
    }
}
