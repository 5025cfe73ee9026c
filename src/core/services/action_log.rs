use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use crate::core::errors::{Result, TrackerError};
use crate::core::models::action_record::{ActionRecord, NewAction};

/// Default number of entries kept in history.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Bounded, newest-first log of completed mutations.
///
/// Constructed once per session and passed to whoever needs it. All
/// methods take `&self`; the entries sit behind a mutex so `record` and
/// `revert` can be called from concurrent flows.
#[derive(Debug)]
pub struct ActionLog {
    entries: Mutex<VecDeque<ActionRecord>>,
    max_history: usize,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl ActionLog {
    /// Create an empty log holding at most `max_history` entries.
    pub fn new(max_history: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(max_history.min(1024))),
            max_history,
        }
    }

    /// Rebuild a log from previously saved records (newest first).
    /// Entries past the cap are dropped.
    pub fn from_records(records: Vec<ActionRecord>, max_history: usize) -> Self {
        let mut entries: VecDeque<ActionRecord> = records.into();
        entries.truncate(max_history);
        Self {
            entries: Mutex::new(entries),
            max_history,
        }
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Append a completed mutation and return its generated id.
    ///
    /// The entry is placed at the front; anything past the cap falls off
    /// the back without notice.
    pub fn record(&self, action: NewAction) -> String {
        let id = Uuid::new_v4().to_string();
        let record = action.into_record(id.clone(), Utc::now());

        tracing::debug!(
            id = %id,
            action = %record.action,
            entity_type = %record.entity_type,
            entity_id = %record.entity_id,
            "recorded action"
        );

        let mut entries = self.lock();
        entries.push_front(record);
        if entries.len() > self.max_history {
            let evicted = entries.len() - self.max_history;
            entries.truncate(self.max_history);
            tracing::debug!(evicted, "history cap reached, oldest entries dropped");
        }

        id
    }

    /// Entries that can still be undone, newest first.
    pub fn list(&self) -> Vec<ActionRecord> {
        self.lock()
            .iter()
            .filter(|r| !r.is_reverted())
            .cloned()
            .collect()
    }

    /// Every retained entry, reverted ones included, newest first.
    pub fn all(&self) -> Vec<ActionRecord> {
        self.lock().iter().cloned().collect()
    }

    /// Mark an entry as reverted and hand back a copy of it as it was found.
    ///
    /// Fails with `NotRevertible` when the id is unknown or already
    /// reverted; the log is left untouched in that case. The entity store
    /// is not touched here, the caller applies the inverse afterwards.
    pub fn revert(&self, id: &str) -> Result<ActionRecord> {
        let mut entries = self.lock();

        let entry = entries
            .iter_mut()
            .find(|r| r.id == id && !r.is_reverted())
            .ok_or_else(|| TrackerError::NotRevertible { id: id.to_string() })?;

        let found = entry.clone();
        entry.reverted_at = Some(Utc::now());

        tracing::debug!(
            id = %id,
            action = %found.action,
            entity_type = %found.entity_type,
            "marked action reverted"
        );

        Ok(found)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of retained entries, reverted ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written entry
    // behind, so a poisoned mutex is still safe to use.
    fn lock(&self) -> MutexGuard<'_, VecDeque<ActionRecord>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
