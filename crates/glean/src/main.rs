//! glean CLI binary.
//!
//! - Run one metadata pass over the configured store
//! - Serve the timer and HTTP triggers
//! - Classify keys without touching storage

use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, classify_keys, run_once, serve};

    // .env must be loaded before the config layers read GLEAN__ variables
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    glean::init_tracing(cli.verbose, cli.json_logs)?;

    match cli.command {
        Commands::Run { force, format } => {
            let config = glean::GleanConfig::load(cli.config.as_deref())?;
            let report = run_once(&config, force, format).await?;
            if !report.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Serve => {
            let config = glean::GleanConfig::load(cli.config.as_deref())?;
            serve(config).await?;
        }

        Commands::Classify { keys, format } => {
            classify_keys(&keys, format)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
