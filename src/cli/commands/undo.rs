use crate::cli::commands::session_helpers::Session;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::revert_service::{RevertOutcome, RevertService};

/// Execute the `affitrack undo` command.
///
/// The history entry is marked reverted and saved before the inverse change
/// touches the data file. The mark stays even when applying fails.
pub fn execute(id: &str) -> Result<()> {
    let session = Session::open()?;
    let service = RevertService::new(&session.store);

    let (record, outcome) = service.undo_with(&session.log, id, |_| session.save_history())?;

    let what = format!("{} {}", record.entity_type, record.entity_name);
    match outcome {
        RevertOutcome::Recreated { entity_id } if entity_id != record.entity_id => {
            output::success(&format!("Restored deleted {what} under new id {entity_id}"));
        }
        RevertOutcome::Recreated { .. } => output::success(&format!("Restored deleted {what}")),
        RevertOutcome::Restored { .. } => {
            output::success(&format!("Restored previous values of {what}"))
        }
        RevertOutcome::Removed { .. } => output::success(&format!("Removed created {what}")),
    }
    output::success("Action reverted successfully");
    Ok(())
}
