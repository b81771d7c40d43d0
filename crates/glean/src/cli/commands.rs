//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// glean - generate metadata sidecars for media in object storage
#[derive(Parser, Debug)]
#[command(name = "glean")]
#[command(about = "Generate metadata sidecars for media in object storage", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file, replacing ./glean.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// glean subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one metadata pass over the configured store
    Run {
        /// Regenerate sidecars that already exist
        #[arg(long)]
        force: bool,

        /// Report format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Start the timer and HTTP triggers
    Serve,

    /// Print the media kind of each key
    Classify {
        /// Object keys to classify
        #[arg(required = true)]
        keys: Vec<String>,

        /// Listing format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// How results are printed
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One summary line per result
    Human,
    /// Pretty-printed JSON
    Json,
}
