//! CLI command definitions and handlers.

pub mod metrics;
pub mod search;

use clap::{Parser, Subcommand};

/// cbir - Content-based image retrieval
#[derive(Parser)]
#[command(name = "cbir")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Search arguments (directory, query, metric, output options).
    #[command(flatten)]
    pub search: search::SearchArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List the registered metric keys
    Metrics,
}

/// Process exit status. Usage errors exit with 2 through clap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Ranking completed.
    Success = 0,
    /// A fatal error stopped the run.
    Error = 1,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
