use colored::Colorize;

use crate::cli::commands::session_helpers::Session;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::asset_service::AssetService;

/// Execute the `affitrack reminders` command.
pub fn execute(days: i64) -> Result<()> {
    let session = Session::open()?;
    let service = AssetService::new(&session.store, &session.log, session.user_id());
    let today = chrono::Local::now().date_naive();
    let due = service.refund_reminders(today, days)?;

    output::header(&format!("Refund reminders (next {days} days)"));
    if due.is_empty() {
        output::warning("No upcoming refund reminders");
        return Ok(());
    }

    for order in &due {
        println!(
            "  {} {} {:<20} {} {}",
            order
                .refund_reminder_date
                .as_deref()
                .unwrap_or_default()
                .bold(),
            "│".dimmed(),
            order.order_number,
            order.product_name.as_deref().unwrap_or("-"),
            format!("{} {}", order.currency, order.amount).dimmed()
        );
    }
    Ok(())
}
