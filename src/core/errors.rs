use crate::core::models::action_record::ActionKind;
use crate::core::models::entity::EntityKind;

/// All domain errors for affitrack.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("{kind} '{id}' not found")]
    EntityNotFound { kind: EntityKind, id: String },

    #[error("{kind} '{id}' already exists")]
    EntityAlreadyExists { kind: EntityKind, id: String },

    #[error(
        "{kind} references {target} '{id}', which does not exist\n\n  \
         Create the {target} first, or clear the reference."
    )]
    ReferenceNotFound {
        kind: EntityKind,
        target: EntityKind,
        id: String,
    },

    #[error(
        "{kind} '{id}' is still referenced by {count} {dependent} record(s)\n\n  \
         Delete or reassign them first."
    )]
    ReferenceInUse {
        kind: EntityKind,
        id: String,
        dependent: EntityKind,
        count: usize,
    },

    #[error("Invalid {field}: {detail}")]
    ValidationFailed { field: String, detail: String },

    #[error("Invalid {kind} data: {detail}")]
    InvalidEntityData { kind: EntityKind, detail: String },

    #[error(
        "Failed to revert action '{id}'\n\n  \
         The action does not exist, was evicted from history, or was already reverted.\n  \
         Run 'affitrack history' to see actions that can still be undone."
    )]
    NotRevertible { id: String },

    #[error("{action} record for {kind} '{id}' carries no previous snapshot")]
    MissingSnapshot {
        action: ActionKind,
        kind: EntityKind,
        id: String,
    },

    #[error("Snapshot holds a {found} but the record is for a {expected}")]
    SnapshotMismatch {
        expected: EntityKind,
        found: EntityKind,
    },

    #[error(
        "Action marked as reverted, but restoring {kind} '{id}' failed: {reason}\n\n  \
         The history entry stays reverted; fix the data by hand if needed."
    )]
    InverseApplyFailed {
        kind: EntityKind,
        id: String,
        reason: String,
    },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("Data file error: {detail}")]
    StoreError { detail: String },

    #[error("History file error: {detail}")]
    HistoryError { detail: String },

    #[error("Cannot lock data directory: {detail}")]
    LockError { detail: String },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(
        "This project uses format version {project_version}, but your affitrack \
         only supports up to version {supported_version}.\n\n  \
         Solutions:\n    \
         → Install latest: cargo install affitrack --force"
    )]
    FormatVersionTooNew {
        project_version: u32,
        supported_version: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrackerError>;
