use colored::Colorize;

use crate::core::models::action_record::ActionKind;

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Action name padded and colored the way history rows show it.
pub fn action_badge(action: ActionKind) -> String {
    let label = format!("{:<6}", action.to_string().to_uppercase());
    match action {
        ActionKind::Create => label.green().to_string(),
        ActionKind::Update => label.blue().to_string(),
        ActionKind::Delete => label.red().to_string(),
    }
}
