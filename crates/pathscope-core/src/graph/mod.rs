//! Graph store
//!
//! Owns the node table, the edge list and the adjacency index every search
//! reads. The graph is undirected: each edge contributes one adjacency entry
//! in each direction, and the two halves are always added and removed
//! together.

pub mod generate;
pub mod mutation;
pub mod types;

pub use generate::{city_graph, seeded_city_graph};
pub use mutation::EdgeJournal;
pub use types::{Adjacent, Edge, Node, NodeId, Position, Route};

use crate::error::{PathscopeError, Result};

/// Undirected weighted graph with tombstoned node removal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Adjacent>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node at `position` and return its identity
    pub fn add_node(&mut self, position: Position) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            position,
            removed: false,
        });
        self.adjacency.push(Vec::new());
        id
    }

    /// Add an undirected edge `u–v` with the given weight
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: f64) -> Result<()> {
        self.require_node(u, "endpoint")?;
        self.require_node(v, "endpoint")?;
        if u == v {
            return Err(PathscopeError::SelfLoop(u));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(PathscopeError::InvalidWeight { u, v, weight });
        }

        self.edges.push(Edge { u, v, weight });
        self.adjacency[u].push(Adjacent { node: v, weight });
        self.adjacency[v].push(Adjacent { node: u, weight });
        Ok(())
    }

    /// Tombstone a node and cascade removal of every edge touching it.
    ///
    /// Returns the removed edges in their original order.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Vec<Edge>> {
        self.require_node(id, "node")?;

        let (removed, kept): (Vec<Edge>, Vec<Edge>) =
            self.edges.iter().copied().partition(|edge| edge.touches(id));
        self.edges = kept;

        for entry in std::mem::take(&mut self.adjacency[id]) {
            self.adjacency[entry.node].retain(|back| back.node != id);
        }
        self.nodes[id].removed = true;

        tracing::debug!(node = id, edges = removed.len(), "node_removed");
        Ok(removed)
    }

    /// Fail with a data error unless `id` names a present node
    pub fn require_node(&self, id: NodeId, role: &'static str) -> Result<()> {
        match self.nodes.get(id) {
            None => Err(PathscopeError::UnknownNode {
                role,
                id,
                node_count: self.nodes.len(),
            }),
            Some(node) if node.removed => Err(PathscopeError::RemovedNode { role, id }),
            Some(_) => Ok(()),
        }
    }

    /// True if `id` names a node that has not been removed
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| !node.removed)
    }

    /// Number of node slots, removed nodes included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Every node slot in identity order, removed nodes included
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Present nodes in identity order
    pub fn present_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| !node.removed)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Adjacency entries of `id` in insertion order
    pub fn neighbors(&self, id: NodeId) -> &[Adjacent] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Position of `id`, if the slot exists
    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.nodes.get(id).map(|node| node.position)
    }

    /// Cheapest weight among the current `u–v` adjacency entries
    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.neighbors(u)
            .iter()
            .filter(|entry| entry.node == v)
            .map(|entry| entry.weight)
            .min_by(f64::total_cmp)
    }

    /// Sum of edge weights along `nodes`, `None` if a hop has no edge
    pub fn path_cost(&self, nodes: &[NodeId]) -> Option<f64> {
        nodes
            .windows(2)
            .map(|hop| self.edge_weight(hop[0], hop[1]))
            .sum()
    }

    /// Check that every adjacency entry `u→v` has a matching `v→u` entry
    /// with the same weight.
    pub fn is_symmetric(&self) -> bool {
        self.adjacency.iter().enumerate().all(|(u, entries)| {
            entries.iter().all(|entry| {
                let forward = entries
                    .iter()
                    .filter(|e| e.node == entry.node && e.weight == entry.weight)
                    .count();
                let backward = self.adjacency[entry.node]
                    .iter()
                    .filter(|e| e.node == u && e.weight == entry.weight)
                    .count();
                forward == backward
            })
        })
    }

    /// Number of connected components among present nodes
    pub fn component_count(&self) -> usize {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = Vec::new();
        let mut components = 0;

        for root in self.present_nodes().map(|node| node.id) {
            if seen[root] {
                continue;
            }
            components += 1;
            seen[root] = true;
            stack.push(root);
            while let Some(current) = stack.pop() {
                for entry in self.neighbors(current) {
                    if !seen[entry.node] {
                        seen[entry.node] = true;
                        stack.push(entry.node);
                    }
                }
            }
        }
        components
    }

    pub(crate) fn adjacency_mut(&mut self, id: NodeId) -> &mut Vec<Adjacent> {
        &mut self.adjacency[id]
    }
}
