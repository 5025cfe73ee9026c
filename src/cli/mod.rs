pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::models::entity::EntityKind;

/// Track affiliate assets from the terminal, with a revertible action history.
#[derive(Parser, Debug)]
#[command(name = "affitrack", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Actor recorded on history entries
    #[arg(long, global = true, env = "AFFITRACK_USER")]
    pub user: Option<String>,

    /// Path to the data directory
    #[arg(long, global = true)]
    pub dir: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize affitrack in the current directory
    Init,

    /// Create an entity from a JSON object
    Add {
        /// identity, website, card, advertiser, account or order
        kind: EntityKind,
        /// Fields as a JSON object, e.g. '{"name":"Jane Doe",...}'
        data: String,
    },

    /// Change fields of an entity (JSON object merged into current fields)
    Update {
        kind: EntityKind,
        id: String,
        /// Fields to change as a JSON object; null clears an optional field
        data: String,
    },

    /// Delete an entity
    Delete { kind: EntityKind, id: String },

    /// Print one entity as JSON
    Show { kind: EntityKind, id: String },

    /// List entities of one kind
    List {
        kind: EntityKind,
        /// Only rows with this status, e.g. "Active" or "Pending Docs"
        #[arg(long)]
        status: Option<String>,
        /// Only rows whose names, emails or numbers contain this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Export entities of one kind as CSV
    Export {
        kind: EntityKind,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Only rows with this status
        #[arg(long)]
        status: Option<String>,
        /// Only rows containing this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show counts and order totals across all collections
    Stats,

    /// Show orders with a refund reminder coming up
    Reminders {
        /// Look this many days ahead
        #[arg(long, default_value_t = 7)]
        days: i64,
    },

    /// Show actions that can be undone
    History {
        /// Include reverted actions
        #[arg(long)]
        all: bool,
        /// Show only the N most recent entries
        #[arg(long)]
        last: Option<usize>,
    },

    /// Revert a recorded action
    Undo {
        /// Action id as shown by 'affitrack history'
        id: String,
    },

    /// Forget the whole action history
    HistoryClear,
}
