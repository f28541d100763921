//! JSON graph documents
//!
//! ```json
//! { "nodes": [{ "x": 10.0, "y": 20.0 }, { "x": 30.0, "y": 5.0, "removed": true }],
//!   "edges": [{ "u": 0, "v": 1, "weight": 21.2 }] }
//! ```
//!
//! Loading replays the document through the graph store, so every store
//! check (unknown endpoints, self loops, bad weights) applies to files too.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use pathscope_core::error::Result;
use pathscope_core::graph::{Edge, Graph, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub removed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphDocument {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content + "\n")?;
        Ok(())
    }

    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .iter()
                .map(|node| NodeRecord {
                    x: node.position.x,
                    y: node.position.y,
                    removed: node.removed,
                })
                .collect(),
            edges: graph.edges().to_vec(),
        }
    }

    /// Rebuild the graph: nodes, then edges, then removals
    pub fn to_graph(&self) -> Result<Graph> {
        let mut graph = Graph::new();
        for node in &self.nodes {
            graph.add_node(Position::new(node.x, node.y));
        }
        for edge in &self.edges {
            graph.add_edge(edge.u, edge.v, edge.weight)?;
        }
        for (id, node) in self.nodes.iter().enumerate() {
            if node.removed {
                graph.remove_node(id)?;
            }
        }
        Ok(graph)
    }
}

/// Read a document and build its graph
pub fn load_graph(path: &Path) -> Result<Graph> {
    let graph = GraphDocument::read(path)?.to_graph()?;
    tracing::debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph_loaded"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathscope_core::PathscopeError;
    use tempfile::tempdir;

    fn sample() -> GraphDocument {
        serde_json::from_str(
            r#"{
                "nodes": [{"x": 0, "y": 0}, {"x": 3, "y": 4}, {"x": 6, "y": 8, "removed": true}],
                "edges": [{"u": 0, "v": 1, "weight": 5}, {"u": 1, "v": 2, "weight": 5}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_removed_nodes_drop_their_edges() {
        let graph = sample().to_graph().unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.contains(2));
        assert_eq!(graph.edge_weight(0, 1), Some(5.0));
    }

    #[test]
    fn test_write_then_read_preserves_graph() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let graph = sample().to_graph().unwrap();

        GraphDocument::from_graph(&graph).write(&path).unwrap();
        let reloaded = load_graph(&path).unwrap();
        assert_eq!(reloaded.edges(), graph.edges());
        assert_eq!(reloaded.nodes(), graph.nodes());
    }

    #[test]
    fn test_self_loop_rejected() {
        let document: GraphDocument = serde_json::from_str(
            r#"{"nodes": [{"x": 0, "y": 0}], "edges": [{"u": 0, "v": 0, "weight": 1}]}"#,
        )
        .unwrap();
        assert!(matches!(document.to_graph(), Err(PathscopeError::SelfLoop(0))));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ nodes: ").unwrap();
        assert!(matches!(load_graph(&path), Err(PathscopeError::Json(_))));
    }
}
