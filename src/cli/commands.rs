//! CLI commands and argument parsing

use crate::types::{LogLevel, StrategyKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Pager CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pagination settings file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured strategy
    #[arg(short, long, global = true)]
    pub strategy: Option<StrategyKind>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Log level (overrides --verbose)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level requested on the command line
    pub fn tracing_level(&self) -> tracing::Level {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => tracing::Level::DEBUG,
            (None, false) => tracing::Level::INFO,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of a JSON array file
    Paginate {
        /// JSON file holding an array of items
        #[arg(short, long)]
        input: PathBuf,

        /// Paging query string (e.g. "page=2&page_size=5")
        #[arg(short, long, default_value = "")]
        query: String,

        /// Include page-number navigation controls
        #[arg(long)]
        controls: bool,
    },

    /// Validate pagination settings
    Validate,

    /// Decode a cursor token
    Cursor {
        /// Token as received in a `next`/`previous` link
        token: String,
    },

    /// Start HTTP server mode
    Serve {
        /// JSON file holding an array of items
        #[arg(short, long)]
        input: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
