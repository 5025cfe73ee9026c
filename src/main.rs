mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    init_logging(args.verbose);
    cli::context::init(args.dir.as_deref(), args.user.as_deref());

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(args.verbose),
        Commands::Add { kind, data } => cli::commands::add::execute(*kind, data),
        Commands::Update { kind, id, data } => cli::commands::update::execute(*kind, id, data),
        Commands::Delete { kind, id } => cli::commands::delete::execute(*kind, id),
        Commands::Show { kind, id } => cli::commands::show::execute(*kind, id),
        Commands::List {
            kind,
            status,
            search,
        } => cli::commands::list::execute(*kind, status.as_deref(), search.as_deref()),
        Commands::Export {
            kind,
            out,
            status,
            search,
        } => cli::commands::export::execute(*kind, out.as_deref(), status.as_deref(), search.as_deref()),
        Commands::Stats => cli::commands::stats::execute(),
        Commands::Reminders { days } => cli::commands::reminders::execute(*days),
        Commands::History { all, last } => cli::commands::history::execute(*all, *last),
        Commands::Undo { id } => cli::commands::undo::execute(id),
        Commands::HistoryClear => cli::commands::history::execute_clear(),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by `AFFITRACK_LOG`
/// (e.g. `AFFITRACK_LOG=affitrack=debug`). `-v` raises the default to debug.
fn init_logging(verbose: bool) {
    let default = if verbose { "affitrack=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("AFFITRACK_LOG").unwrap_or_else(|_| default.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
