//! Command implementations

mod analyze;
mod config;
mod distance;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Analyze(args) => analyze::execute(args, config_path, &output),
        Commands::Distance(args) => distance::execute(args, &output),
        Commands::Config => config::execute(config_path, &output),
    }
}
