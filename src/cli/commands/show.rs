use crate::cli::commands::session_helpers::Session;
use crate::core::errors::{Result, TrackerError};
use crate::core::models::entity::EntityKind;
use crate::core::services::asset_service::AssetService;

/// Execute the `affitrack show` command: print one entity as pretty JSON.
pub fn execute(kind: EntityKind, id: &str) -> Result<()> {
    let session = Session::open()?;
    let service = AssetService::new(&session.store, &session.log, session.user_id());

    let entity = service
        .get(kind, id)?
        .ok_or_else(|| TrackerError::EntityNotFound {
            kind,
            id: id.to_string(),
        })?;

    let fields = entity.to_fields()?;
    let pretty = serde_json::to_string_pretty(&fields).map_err(|e| TrackerError::InvalidEntityData {
        kind,
        detail: e.to_string(),
    })?;
    println!("{pretty}");
    Ok(())
}
