use serde::Deserialize;
use std::path::Path;

use crate::core::errors::{Result, TrackerError};
use crate::core::services::action_log::DEFAULT_MAX_HISTORY;

/// Top-level configuration read from `.affitrack/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub tracker: TrackerSection,
    pub history: Option<HistorySection>,
    pub store: Option<StoreSection>,
}

impl AppConfig {
    /// Load the configuration from `{data_dir}/config.toml`.
    ///
    /// After parsing, validates the data and history file names to prevent
    /// path traversal from a tampered config file.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join("config.toml");
        if !config_path.exists() {
            return Err(TrackerError::InvalidConfig {
                detail: "config.toml not found. Run 'affitrack init' first.".into(),
            });
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content).map_err(|e| TrackerError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if config.tracker.format_version > CURRENT_FORMAT_VERSION {
            return Err(TrackerError::FormatVersionTooNew {
                project_version: config.tracker.format_version,
                supported_version: CURRENT_FORMAT_VERSION,
            });
        }

        if let Some(history) = &config.history {
            crate::cli::context::validate_simple_filename(&history.file, "history file")?;
            if history.max_entries == 0 {
                return Err(TrackerError::InvalidConfig {
                    detail: "[history] max_entries must be at least 1".into(),
                });
            }
        }
        if let Some(store) = &config.store {
            crate::cli::context::validate_simple_filename(&store.file, "data file")?;
        }

        Ok(config)
    }

    /// Maximum number of history entries, defaulting to 100.
    pub fn max_history(&self) -> usize {
        self.history
            .as_ref()
            .map(|h| h.max_entries)
            .unwrap_or(DEFAULT_MAX_HISTORY)
    }

    /// File name of the entity data file inside the data directory.
    pub fn store_file(&self) -> &str {
        self.store
            .as_ref()
            .map(|s| s.file.as_str())
            .unwrap_or(DEFAULT_STORE_FILE)
    }
}

/// Current format version supported by this build.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

pub const DEFAULT_STORE_FILE: &str = "data.json";
pub const DEFAULT_HISTORY_FILE: &str = "history.json";

/// Contents written by `affitrack init`.
pub const DEFAULT_CONFIG: &str = r#"[tracker]
version = "0.3.0"
format_version = 1
default_user = ""

[history]
max_entries = 100
file = "history.json"

[store]
file = "data.json"
"#;

/// The `[tracker]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerSection {
    pub version: String,
    /// Format version for backward compatibility. Defaults to 1 if missing.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    /// Actor recorded on history entries when no `--user` is given.
    #[serde(default)]
    pub default_user: String,
}

fn default_format_version() -> u32 {
    1
}

/// The `[history]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct HistorySection {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_history_file")]
    pub file: String,
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_HISTORY
}

fn default_history_file() -> String {
    DEFAULT_HISTORY_FILE.to_string()
}

/// The `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    pub file: String,
}
