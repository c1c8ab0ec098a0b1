use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "benchtrack")]
#[command(about = "Benchtrack - Benchmark history ingestion for CI", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a settings file (TOML)
    #[arg(long, env = "BENCHTRACK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record one benchmark run into the history store
    Ingest {
        /// Collector output file (pytest-benchmark JSON, or a plain bench array)
        #[arg(long)]
        results: PathBuf,

        /// GitHub push-event payload supplying the commit metadata
        #[arg(long, env = "GITHUB_EVENT_PATH")]
        event: PathBuf,

        /// History store file
        #[arg(long)]
        store: Option<PathBuf>,

        /// Suite name the run belongs to
        #[arg(long)]
        suite: Option<String>,

        /// Measurement harness tag
        #[arg(long)]
        tool: Option<String>,

        /// Repository URL (defaults to the one in the event payload)
        #[arg(long)]
        repo_url: Option<String>,

        /// Insert a late-arriving run at its date-sorted position instead
        /// of rejecting it
        #[arg(long)]
        force: bool,

        /// Keep only this many newest entries per suite
        #[arg(long)]
        max_entries: Option<usize>,
    },

    /// Summarize a history store
    Show {
        /// History store file
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Check that a history store parses cleanly
    Validate {
        /// History store file
        #[arg(long)]
        store: Option<PathBuf>,
    },
}
