//! Command-line interface module.

mod classify;
mod commands;
mod run;
mod serve;

pub use classify::classify_keys;
pub use commands::{Cli, Commands, OutputFormat};
pub use run::run_once;
pub use serve::serve;
