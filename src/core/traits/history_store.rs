use crate::core::errors::Result;
use crate::core::models::action_record::ActionRecord;

/// Port for carrying the action history across process restarts.
pub trait HistoryStore: Send + Sync {
    /// Load the saved history, newest first. A missing file is an empty history.
    fn load(&self) -> Result<Vec<ActionRecord>>;

    /// Replace the saved history with `records` (newest first).
    fn save(&self, records: &[ActionRecord]) -> Result<()>;
}
