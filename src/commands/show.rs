//! `pathscope show` command - summarize a graph document

use std::path::Path;

use pathscope_core::error::Result;
use pathscope_core::graph::NodeId;

use crate::cli::{Cli, OutputFormat};
use crate::document::load_graph;

/// Execute the show command
pub fn execute(cli: &Cli, path: &Path) -> Result<()> {
    let graph = load_graph(path)?;
    let removed: Vec<NodeId> = graph
        .nodes()
        .iter()
        .filter(|node| node.removed)
        .map(|node| node.id)
        .collect();
    let present = graph.node_count() - removed.len();
    let components = graph.component_count();
    let symmetric = graph.is_symmetric();

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "nodes": graph.node_count(),
                "present": present,
                "removed": removed,
                "edges": graph.edge_count(),
                "components": components,
                "symmetric": symmetric,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("Nodes: {} ({} present)", graph.node_count(), present);
            if !removed.is_empty() {
                let ids: Vec<String> = removed.iter().map(NodeId::to_string).collect();
                println!("Removed: {}", ids.join(", "));
            }
            println!("Edges: {}", graph.edge_count());
            println!("Components: {components}");
            if !cli.quiet {
                println!(
                    "Adjacency: {}",
                    if symmetric { "symmetric" } else { "ASYMMETRIC" }
                );
            }
        }
    }
    Ok(())
}
