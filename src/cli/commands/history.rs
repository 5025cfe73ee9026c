use colored::Colorize;

use crate::cli::commands::session_helpers::Session;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::action_record::ActionRecord;

/// Execute the `affitrack history` command.
///
/// Shows actions that can still be undone, newest first. `--all` also
/// shows reverted ones; `--last N` keeps only the N most recent.
pub fn execute(all: bool, last: Option<usize>) -> Result<()> {
    let session = Session::open()?;

    let mut entries = if all {
        session.log.all()
    } else {
        session.log.list()
    };
    if let Some(n) = last {
        entries.truncate(n);
    }

    if entries.is_empty() {
        output::header("affitrack history");
        output::warning("No actions to undo");
        println!("  Actions you perform will appear here and can be reverted.");
        return Ok(());
    }

    output::header(&format!("affitrack history ({} entries)", entries.len()));
    println!();

    for entry in &entries {
        print_entry(entry);
    }

    Ok(())
}

/// Execute the `affitrack history-clear` command.
pub fn execute_clear() -> Result<()> {
    let session = Session::open()?;
    if session.log.is_empty() {
        output::warning("History is already empty");
        return Ok(());
    }
    let count = session.log.len();
    session.log.clear();
    session.save_history()?;

    output::success(&format!("Cleared {count} history entries"));
    Ok(())
}

fn print_entry(entry: &ActionRecord) {
    let date = entry.created_at.format("%Y-%m-%d %H:%M:%S");
    let reverted = if entry.is_reverted() {
        "(reverted)".dimmed().to_string()
    } else {
        String::new()
    };

    println!(
        "  {} {} {} {:<10} {} {} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        output::action_badge(entry.action),
        entry.entity_type,
        entry.entity_name.bold(),
        entry.id.dimmed(),
        reverted,
    );
}
