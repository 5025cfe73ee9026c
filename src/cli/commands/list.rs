use colored::Colorize;

use crate::cli::commands::session_helpers::Session;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::entity::EntityKind;
use crate::core::models::list_filter::ListFilter;
use crate::core::services::asset_service::AssetService;

/// Execute the `affitrack list` command.
pub fn execute(kind: EntityKind, status: Option<&str>, search: Option<&str>) -> Result<()> {
    let session = Session::open()?;
    let service = AssetService::new(&session.store, &session.log, session.user_id());
    let filter = ListFilter::new(status, search);
    let rows = service.list_filtered(kind, &filter)?;

    if rows.is_empty() {
        if filter.is_empty() {
            output::warning(&format!("No {kind} records yet"));
        } else {
            output::warning(&format!("No {kind} records match the filter"));
        }
        return Ok(());
    }

    output::header(&format!("{kind} ({})", rows.len()));
    for row in &rows {
        println!(
            "  {} {} {:<28} {}",
            row.id().dimmed(),
            "│".dimmed(),
            row.display_name(),
            row.status()
        );
    }
    Ok(())
}
