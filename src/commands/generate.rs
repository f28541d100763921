//! `pathscope generate` command - write a random city graph document

use std::path::Path;

use pathscope_core::config::EngineConfig;
use pathscope_core::error::Result;
use pathscope_core::graph::seeded_city_graph;

use crate::cli::{Cli, OutputFormat};
use crate::document::GraphDocument;

/// Execute the generate command
pub fn execute(
    cli: &Cli,
    config: &EngineConfig,
    out: &Path,
    seed: Option<u64>,
    nodes: Option<usize>,
) -> Result<()> {
    let mut generator = config.generator.clone();
    if let Some(nodes) = nodes {
        generator.nodes = nodes;
    }

    let graph = seeded_city_graph(&generator, seed)?;
    GraphDocument::from_graph(&graph).write(out)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": out.display().to_string(),
                "nodes": graph.node_count(),
                "edges": graph.edge_count(),
                "seed": seed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Wrote {} nodes and {} edges to {}",
                    graph.node_count(),
                    graph.edge_count(),
                    out.display()
                );
            }
        }
    }
    Ok(())
}
