use crate::cli::commands::add::parse_json;
use crate::cli::commands::session_helpers::Session;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::entity::EntityKind;
use crate::core::services::asset_service::AssetService;

/// Execute the `affitrack update` command.
///
/// The JSON argument only needs the fields that change.
pub fn execute(kind: EntityKind, id: &str, data: &str) -> Result<()> {
    let session = Session::open()?;
    let patch = parse_json(kind, data)?;

    let service = AssetService::new(&session.store, &session.log, session.user_id());
    let updated = service.patch(kind, id, &patch)?;
    session.save_history()?;

    output::success(&format!("Updated {kind} {} ({id})", updated.display_name()));
    Ok(())
}
