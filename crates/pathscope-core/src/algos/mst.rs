//! Kruskal's minimum spanning forest.

use std::collections::VecDeque;

use super::event::{Event, Outcome};
use super::trace::{Search, Trace};
use crate::graph::{Edge, Graph, NodeId};

/// Disjoint sets over node identities with path compression and union by rank
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<NodeId>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Representative of the set containing `x`
    pub fn find(&mut self, x: NodeId) -> NodeId {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`. Returns false if they were already joined.
    pub fn union(&mut self, a: NodeId, b: NodeId) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

#[derive(Debug, Clone)]
pub struct Kruskal {
    order: Vec<Edge>,
    cursor: usize,
    sets: UnionFind,
    tree: Vec<Edge>,
    total_weight: f64,
    finished: bool,
}

impl Kruskal {
    #[tracing::instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
    pub fn new(graph: &Graph) -> Self {
        let mut order = graph.edges().to_vec();
        // Stable: equal weights keep edge-list order
        order.sort_by(|a, b| a.weight.total_cmp(&b.weight));
        Self {
            order,
            cursor: 0,
            sets: UnionFind::new(graph.node_count()),
            tree: Vec::new(),
            total_weight: 0.0,
            finished: false,
        }
    }
}

impl Search for Kruskal {
    fn advance(&mut self, _graph: &Graph, out: &mut VecDeque<Event>) {
        if self.finished {
            return;
        }
        let Some(&edge) = self.order.get(self.cursor) else {
            tracing::debug!(
                tree_edges = self.tree.len(),
                total_weight = self.total_weight,
                "kruskal_done"
            );
            out.push_back(Event::Done {
                outcome: Outcome::SpanningTree {
                    edges: std::mem::take(&mut self.tree),
                    total_weight: self.total_weight,
                },
            });
            self.finished = true;
            return;
        };
        self.cursor += 1;

        let Edge { u, v, weight } = edge;
        if self.sets.union(u, v) {
            self.tree.push(edge);
            self.total_weight += weight;
            out.push_back(Event::MstAdd { u, v, weight });
        } else {
            out.push_back(Event::MstSkip { u, v, weight });
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Kruskal's event sequence over every edge of `graph`
pub fn kruskal(graph: &Graph) -> Trace<'_, Kruskal> {
    Trace::new(graph, Kruskal::new(graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algos::fixtures::{diamond, graph_from, triangle, two_components};

    fn tree(events: &[Event]) -> (Vec<Edge>, f64) {
        match events.last().and_then(Event::outcome) {
            Some(Outcome::SpanningTree {
                edges,
                total_weight,
            }) => (edges.clone(), *total_weight),
            other => panic!("expected spanning tree, got {other:?}"),
        }
    }

    #[test]
    fn test_union_find() {
        let mut sets = UnionFind::new(5);
        assert!(sets.union(0, 1));
        assert!(sets.union(3, 4));
        assert!(!sets.union(1, 0));
        assert_ne!(sets.find(0), sets.find(3));
        assert!(sets.union(1, 4));
        assert_eq!(sets.find(0), sets.find(3));
        assert_eq!(sets.find(2), 2);
    }

    #[test]
    fn test_triangle_skips_heaviest_edge() {
        let graph = triangle();
        let events: Vec<Event> = kruskal(&graph).collect();

        assert_eq!(
            &events[..3],
            &[
                Event::MstAdd {
                    u: 0,
                    v: 1,
                    weight: 1.0
                },
                Event::MstAdd {
                    u: 1,
                    v: 2,
                    weight: 1.0
                },
                Event::MstSkip {
                    u: 0,
                    v: 2,
                    weight: 5.0
                },
            ]
        );
        let (edges, total) = tree(&events);
        assert_eq!(edges.len(), 2);
        assert_eq!(total, 2.0);
    }

    #[test]
    fn test_equal_weights_keep_edge_order() {
        let graph = diamond();
        let events: Vec<Event> = kruskal(&graph).collect();
        let (edges, total) = tree(&events);

        let pairs: Vec<(NodeId, NodeId)> = edges.iter().map(|e| (e.u, e.v)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 3)]);
        assert_eq!(total, 3.0);
        assert_eq!(events.len(), graph.edge_count() + 1);
    }

    #[test]
    fn test_forest_for_disconnected_graph() {
        let graph = two_components();
        let (edges, total) = tree(&kruskal(&graph).collect::<Vec<_>>());
        assert_eq!(edges.len(), 3);
        assert_eq!(total, 3.0);
    }

    #[test]
    fn test_edgeless_graph() {
        let graph = graph_from(&[(0.0, 0.0); 3], &[]);
        let events: Vec<Event> = kruskal(&graph).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(tree(&events), (vec![], 0.0));
    }
}
