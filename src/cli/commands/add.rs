use crate::cli::commands::session_helpers::Session;
use crate::cli::output;
use crate::core::errors::{Result, TrackerError};
use crate::core::models::entity::EntityKind;
use crate::core::models::snapshot::Snapshot;
use crate::core::services::asset_service::AssetService;

/// Execute the `affitrack add` command.
pub fn execute(kind: EntityKind, data: &str) -> Result<()> {
    let session = Session::open()?;
    let fields = Snapshot::from_json(kind, parse_json(kind, data)?)?;

    let service = AssetService::new(&session.store, &session.log, session.user_id());
    let created = service.create(fields)?;
    session.save_history()?;

    output::success(&format!(
        "Created {kind} {} ({})",
        created.display_name(),
        created.id()
    ));
    Ok(())
}

/// Parse a command-line JSON argument.
pub fn parse_json(kind: EntityKind, data: &str) -> Result<serde_json::Value> {
    serde_json::from_str(data).map_err(|e| TrackerError::InvalidEntityData {
        kind,
        detail: format!("not valid JSON: {e}"),
    })
}
