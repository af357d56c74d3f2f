//! CLI argument structures

use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::history::{SortKey, DEFAULT_PAGE_SIZE};

/// Clear Windows memory lists through EmptyStandbyList and keep a history
#[derive(Parser)]
#[command(name = "memclean")]
#[command(about = "memclean - Clear memory lists and track freed memory", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to memclean.toml in the config directory)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the history file and version marker
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to the cleanup tool
    #[arg(long, global = true, value_name = "PATH")]
    pub tool: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show current memory usage
    Status,

    /// List the available cleanup operations
    Operations,

    /// Run cleanup operations and record how much memory was freed
    Clean {
        /// Operation to run; repeat for several (defaults to all)
        #[arg(long = "op", value_name = "TOKEN")]
        operations: Vec<String>,

        /// Print the session result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recorded cleanup history
    History {
        /// Column to sort by
        #[arg(long, value_enum, default_value_t = SortKey::Timestamp)]
        sort: SortKey,

        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,

        /// Page to show (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Rows per page
        #[arg(
            long,
            default_value_t = DEFAULT_PAGE_SIZE,
            value_parser = clap::value_parser!(u16).range(5..=50).map(usize::from)
        )]
        page_size: usize,
    },

    /// Delete all recorded history
    ClearHistory {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Compare the installed tool version with the latest release
    Version,
}
