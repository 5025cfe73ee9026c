use crate::cli::{context, output};
use crate::config::app_config::DEFAULT_CONFIG;
use crate::core::errors::{Result, TrackerError};

/// Execute the `affitrack init` command.
///
/// Creates the data directory with a default `config.toml`, an empty
/// data file and an empty history.
pub fn execute(verbose: bool) -> Result<()> {
    let data_dir = context::data_dir();

    if data_dir.join("config.toml").exists() {
        return Err(TrackerError::InvalidConfig {
            detail: format!(
                "affitrack is already initialized here ({} exists)",
                data_dir.display()
            ),
        });
    }

    output::header("affitrack — Initializing project");

    std::fs::create_dir_all(data_dir)?;
    output::success(&format!("Created {}/", data_dir.display()));

    std::fs::write(data_dir.join("config.toml"), DEFAULT_CONFIG)?;
    output::success("Generated config.toml with defaults");

    std::fs::write(data_dir.join("data.json"), "{}\n")?;
    std::fs::write(data_dir.join("history.json"), "[]\n")?;

    output::success("Project ready.\n");
    print_next_steps(verbose);

    Ok(())
}

fn print_next_steps(verbose: bool) {
    println!("  Next steps:");
    println!(
        "    affitrack add identity '{{\"name\":\"Jane Doe\",\"email\":\"jane@example.com\",\"country\":\"US\"}}'"
    );
    println!("    affitrack history");
    if verbose {
        println!();
        println!("  Every add, update and delete is recorded in history.json");
        println!("  (last 100 actions by default, see [history] in config.toml).");
        println!("  Revert one with: affitrack undo <action-id>");
    }
}
