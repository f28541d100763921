//! `pathscope remove-node` command - tombstone a node in a graph document

use std::path::Path;

use pathscope_core::error::Result;
use pathscope_core::graph::NodeId;

use crate::cli::{Cli, OutputFormat};
use crate::document::{load_graph, GraphDocument};

/// Execute the remove-node command
pub fn execute(cli: &Cli, path: &Path, node: NodeId, out: Option<&Path>) -> Result<()> {
    let mut graph = load_graph(path)?;
    let removed = graph.remove_node(node)?;

    let destination = out.unwrap_or(path);
    GraphDocument::from_graph(&graph).write(destination)?;

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "node": node,
                "removed_edges": removed,
                "path": destination.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Removed node {node} and {} edges; wrote {}",
                    removed.len(),
                    destination.display()
                );
            }
        }
    }
    Ok(())
}
