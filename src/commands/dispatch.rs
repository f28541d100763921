//! Command dispatch logic for pathscope
use std::env;
use std::time::Instant;

use pathscope_core::config::EngineConfig;
use pathscope_core::error::Result;

use crate::cli::{Cli, Commands};
use crate::commands;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = load_config(cli)?;
    tracing::debug!(elapsed = ?start.elapsed(), "load_config");

    match &cli.command {
        Commands::Trace(args) => commands::trace::execute(cli, &config, args),
        Commands::Generate { out, seed, nodes } => {
            commands::generate::execute(cli, &config, out, *seed, *nodes)
        }
        Commands::Show { graph } => commands::show::execute(cli, graph),
        Commands::RemoveNode { graph, node, out } => {
            commands::remove_node::execute(cli, graph, *node, out.as_deref())
        }
    }
}

/// Explicit `--config` file, else `pathscope.toml` in the working directory
fn load_config(cli: &Cli) -> Result<EngineConfig> {
    match &cli.config {
        Some(path) => EngineConfig::load(path),
        None => EngineConfig::discover(&env::current_dir()?),
    }
}
