use crate::cli::commands::session_helpers::Session;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::entity::EntityKind;
use crate::core::services::asset_service::AssetService;

/// Execute the `affitrack delete` command.
pub fn execute(kind: EntityKind, id: &str) -> Result<()> {
    let session = Session::open()?;

    let service = AssetService::new(&session.store, &session.log, session.user_id());
    let deleted = service.delete(kind, id)?;
    session.save_history()?;

    output::success(&format!("Deleted {kind} {} ({id})", deleted.display_name()));
    println!("  Changed your mind? Run 'affitrack history' and 'affitrack undo <id>'.");
    Ok(())
}
