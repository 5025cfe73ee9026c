use std::path::Path;

use crate::cli::commands::session_helpers::Session;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::entity::EntityKind;
use crate::core::models::list_filter::ListFilter;
use crate::core::services::asset_service::AssetService;
use crate::core::services::export_service::ExportService;

/// Execute the `affitrack export` command.
///
/// CSV goes to stdout unless `--out` names a file.
pub fn execute(
    kind: EntityKind,
    out: Option<&Path>,
    status: Option<&str>,
    search: Option<&str>,
) -> Result<()> {
    let session = Session::open()?;
    let service = AssetService::new(&session.store, &session.log, session.user_id());
    let rows = service.list_filtered(kind, &ListFilter::new(status, search))?;

    match out {
        Some(path) => {
            let mut buf = Vec::new();
            let written = ExportService.write_csv(kind, &rows, &mut buf)?;
            std::fs::write(path, buf)?;
            output::success(&format!(
                "Exported {written} {kind} record(s) to {}",
                path.display()
            ));
        }
        None => {
            ExportService.write_csv(kind, &rows, std::io::stdout().lock())?;
        }
    }
    Ok(())
}
