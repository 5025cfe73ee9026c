use colored::Colorize;

use crate::cli::commands::session_helpers::Session;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::asset_service::AssetService;

/// Execute the `affitrack stats` command.
pub fn execute() -> Result<()> {
    let session = Session::open()?;
    let service = AssetService::new(&session.store, &session.log, session.user_id());
    let stats = service.overview(chrono::Local::now().date_naive())?;

    output::header("affitrack overview");
    row(
        "Identities",
        &format!(
            "{} ({} active, {} burned)",
            stats.identities, stats.active_identities, stats.burned_identities
        ),
    );
    row(
        "Websites",
        &format!("{} ({} active)", stats.websites, stats.active_websites),
    );
    row("Cards", &format!("{} ({} active)", stats.cards, stats.active_cards));
    row(
        "Orders",
        &format!("{} ({} pending)", stats.orders, stats.pending_orders),
    );
    row("Revenue", &format!("{:.2}", stats.completed_revenue));
    row("Commissions", &format!("{:.2}", stats.completed_commission));
    row("Refund reminders", &stats.reminders_due.to_string());

    if stats.reminders_due > 0 {
        output::warning("Run 'affitrack reminders' to see which orders need attention");
    }
    Ok(())
}

fn row(label: &str, value: &str) {
    println!("  {:<18} {}", label.dimmed(), value);
}
