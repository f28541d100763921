//! CLI argument parsing for pathscope
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json, --config

pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use pathscope_core::graph::NodeId;
use pathscope_core::Algorithm;
pub use output::OutputFormat;

/// Pathscope - step-by-step traces of graph searches
#[derive(Parser, Debug)]
#[command(name = "pathscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (e.g. `debug`, `pathscope_core=trace`)
    #[arg(long, global = true, env = "PATHSCOPE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Engine configuration file (defaults to ./pathscope.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an algorithm and print its events one per line
    Trace(TraceArgs),

    /// Generate a random city graph document
    Generate {
        /// Output file
        #[arg(long, short)]
        out: PathBuf,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Number of nodes (overrides the configured count)
        #[arg(long)]
        nodes: Option<usize>,
    },

    /// Summarize a graph document
    Show {
        /// Graph document
        #[arg(long, short)]
        graph: PathBuf,
    },

    /// Remove a node and every edge touching it
    RemoveNode {
        /// Graph document
        #[arg(long, short)]
        graph: PathBuf,

        /// Node to remove
        #[arg(long, short)]
        node: NodeId,

        /// Write the result here instead of overwriting the input
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct TraceArgs {
    /// Algorithm: dijkstra, astar, bidirectional-astar, bfs, dfs, kruskal, yen
    pub algorithm: Algorithm,

    /// Graph document
    #[arg(long, short)]
    pub graph: PathBuf,

    /// Source node
    #[arg(long, short)]
    pub source: Option<NodeId>,

    /// Target node
    #[arg(long, short)]
    pub target: Option<NodeId>,

    /// Number of paths for yen
    #[arg(short)]
    pub k: Option<usize>,

    /// Stop pulling after this many events
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print only the final event
    #[arg(long)]
    pub summary: bool,
}
