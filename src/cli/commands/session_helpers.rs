use std::path::Path;

use crate::adapters::dir_lock::DataDirLock;
use crate::adapters::history::json_history_file::JsonHistoryFile;
use crate::adapters::stores::json_file_store::JsonFileStore;
use crate::cli::context;
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::services::action_log::ActionLog;
use crate::core::traits::history_store::HistoryStore;

/// Everything a command needs: config, the entity store, and the history
/// for this run.
///
/// The data directory stays locked until the session is dropped, so no
/// other run can load or write the files in between.
pub struct Session {
    pub config: AppConfig,
    pub store: JsonFileStore,
    pub log: ActionLog,
    history_file: JsonHistoryFile,
    _lock: DataDirLock,
}

impl Session {
    /// Open the project in the current data directory.
    pub fn open() -> Result<Self> {
        let data_dir = context::require_initialized()?;
        Self::open_in(data_dir)
    }

    pub fn open_in(data_dir: &Path) -> Result<Self> {
        let lock = DataDirLock::acquire(data_dir)?;
        let config = AppConfig::load(data_dir)?;
        let store = JsonFileStore::open(data_dir.join(config.store_file()))?;
        let history_file = JsonHistoryFile::from_config(data_dir, config.history.as_ref());
        let log = ActionLog::from_records(history_file.load()?, config.max_history());

        tracing::debug!(
            data_dir = %data_dir.display(),
            history_entries = log.len(),
            max_history = log.max_history(),
            "session opened"
        );

        Ok(Self {
            config,
            store,
            log,
            history_file,
            _lock: lock,
        })
    }

    /// Actor for new history entries: `--user`, then `AFFITRACK_USER`,
    /// then `[tracker] default_user`, else empty.
    pub fn user_id(&self) -> String {
        context::user_override()
            .map(str::to_string)
            .unwrap_or_else(|| self.config.tracker.default_user.clone())
    }

    /// Write the history back so the next run sees it.
    pub fn save_history(&self) -> Result<()> {
        self.history_file.save(&self.log.all())
    }
}
