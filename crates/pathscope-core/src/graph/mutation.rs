//! Reversible adjacency edits.
//!
//! Yen's algorithm hides edges and nodes from a sub-search and then puts
//! them back. Every removed adjacency entry is recorded together with the
//! index it occupied, and [`EdgeJournal::restore`] re-inserts the entries in
//! reverse removal order, which reproduces the original adjacency lists
//! exactly, including their order. Only the adjacency index is touched; the
//! edge list never changes during a mutation window.

use super::{Adjacent, Graph, NodeId};

#[derive(Debug, Clone, PartialEq)]
struct Removal {
    owner: NodeId,
    index: usize,
    entry: Adjacent,
}

/// Record of adjacency entries hidden from the graph
#[derive(Debug, Default, PartialEq)]
#[must_use = "a journal must be restored or the graph stays mutated"]
pub struct EdgeJournal {
    removals: Vec<Removal>,
}

impl EdgeJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of adjacency entries currently hidden
    pub fn len(&self) -> usize {
        self.removals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removals.is_empty()
    }

    /// Hide every `u–v` edge, both directions.
    pub fn cut_edge(&mut self, graph: &mut Graph, u: NodeId, v: NodeId) {
        self.remove_matching(graph, u, v);
        self.remove_matching(graph, v, u);
    }

    /// Hide every edge touching `node`, inbound and outbound.
    pub fn isolate_node(&mut self, graph: &mut Graph, node: NodeId) {
        let neighbors: Vec<NodeId> = graph.neighbors(node).iter().map(|e| e.node).collect();
        for neighbor in neighbors {
            self.remove_matching(graph, neighbor, node);
        }
        let entries = graph.adjacency_mut(node);
        while let Some(entry) = entries.pop() {
            self.removals.push(Removal {
                owner: node,
                index: entries.len(),
                entry,
            });
        }
    }

    /// Put every hidden entry back where it was.
    pub fn restore(mut self, graph: &mut Graph) {
        let restored = self.removals.len();
        while let Some(removal) = self.removals.pop() {
            graph
                .adjacency_mut(removal.owner)
                .insert(removal.index, removal.entry);
        }
        tracing::trace!(entries = restored, "adjacency_restored");
        debug_assert!(graph.is_symmetric(), "adjacency asymmetric after restore");
    }

    fn remove_matching(&mut self, graph: &mut Graph, owner: NodeId, target: NodeId) {
        let entries = graph.adjacency_mut(owner);
        let mut index = 0;
        while index < entries.len() {
            if entries[index].node == target {
                let entry = entries.remove(index);
                self.removals.push(Removal {
                    owner,
                    index,
                    entry,
                });
            } else {
                index += 1;
            }
        }
    }
}
