//! Breadth-first traversal.
//!
//! Without a target every present node is reached: the start node's
//! component first, then each remaining component from its lowest
//! identity. Levels count hops from the root of each component. With a
//! target the search stays in the start component and stops as soon as the
//! target is dequeued.

use std::collections::VecDeque;

use super::event::{Event, Outcome, Snapshot};
use super::trace::{Search, Trace};
use crate::error::Result;
use crate::graph::types::walk_parents;
use crate::graph::{Graph, NodeId, Route};

#[derive(Debug, Clone)]
pub struct Bfs {
    start: NodeId,
    target: Option<NodeId>,
    levels: Vec<Option<u32>>,
    parent: Vec<Option<NodeId>>,
    /// Weight of the tree path from the component root
    cost: Vec<f64>,
    queue: VecDeque<NodeId>,
    next_root: NodeId,
    finished: bool,
}

impl Bfs {
    #[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
    pub fn new(graph: &Graph, start: NodeId, target: Option<NodeId>) -> Result<Self> {
        graph.require_node(start, "source")?;
        if let Some(target) = target {
            graph.require_node(target, "target")?;
        }

        let n = graph.node_count();
        let mut bfs = Self {
            start,
            target,
            levels: vec![None; n],
            parent: vec![None; n],
            cost: vec![0.0; n],
            queue: VecDeque::new(),
            next_root: 0,
            finished: false,
        };
        bfs.seed(start);
        Ok(bfs)
    }

    /// Hop level assigned to `node`, if it has been discovered
    pub fn level(&self, node: NodeId) -> Option<u32> {
        self.levels.get(node).copied().flatten()
    }

    fn seed(&mut self, root: NodeId) {
        self.levels[root] = Some(0);
        self.queue.push_back(root);
    }

    /// Next present, undiscovered node in identity order
    fn next_component(&mut self, graph: &Graph) -> Option<NodeId> {
        while self.next_root < self.levels.len() {
            let candidate = self.next_root;
            self.next_root += 1;
            if graph.contains(candidate) && self.levels[candidate].is_none() {
                return Some(candidate);
            }
        }
        None
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Levels {
            levels: self.levels.clone(),
        }
    }

    fn expand(&mut self, graph: &Graph, node: NodeId, out: &mut VecDeque<Event>) {
        let level = self.levels[node].unwrap_or(0);
        for entry in graph.neighbors(node) {
            let next = entry.node;
            if self.levels[next].is_some() {
                continue;
            }
            self.levels[next] = Some(level + 1);
            self.parent[next] = Some(node);
            self.cost[next] = self.cost[node] + entry.weight;
            self.queue.push_back(next);
            out.push_back(Event::Discover {
                from: node,
                to: next,
                snapshot: self.snapshot(),
            });
        }
    }

    fn finish(&mut self, out: &mut VecDeque<Event>) {
        let outcome = match self.target {
            None => Outcome::Levels {
                levels: self.levels.clone(),
            },
            Some(target) if self.levels[target].is_none() => Outcome::NoPath,
            Some(target) => Outcome::Found {
                route: Route::new(walk_parents(&self.parent, target), self.cost[target]),
            },
        };
        tracing::debug!(
            start = self.start,
            target = ?self.target,
            reached = self.levels.iter().filter(|l| l.is_some()).count(),
            "bfs_done"
        );
        out.push_back(Event::Done { outcome });
        self.finished = true;
    }
}

impl Search for Bfs {
    fn advance(&mut self, graph: &Graph, out: &mut VecDeque<Event>) {
        if self.finished {
            return;
        }
        if self.queue.is_empty() && self.target.is_none() {
            if let Some(root) = self.next_component(graph) {
                self.seed(root);
            }
        }
        let Some(node) = self.queue.pop_front() else {
            self.finish(out);
            return;
        };

        out.push_back(Event::Visit {
            node,
            side: None,
            snapshot: self.snapshot(),
        });
        if self.target == Some(node) {
            self.finish(out);
        } else {
            self.expand(graph, node, out);
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Breadth-first event sequence from `start`, to `target` if given
pub fn bfs(graph: &Graph, start: NodeId, target: Option<NodeId>) -> Result<Trace<'_, Bfs>> {
    Ok(Trace::new(graph, Bfs::new(graph, start, target)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algos::fixtures::{diamond, graph_from, two_components};

    fn visit_order(events: &[Event]) -> Vec<NodeId> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::Visit { node, .. } => Some(*node),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_whole_graph_covers_every_component() {
        let graph = two_components();
        let events: Vec<Event> = bfs(&graph, 1, None).unwrap().collect();

        assert_eq!(visit_order(&events), vec![1, 0, 2, 3, 4]);
        match events.last().and_then(Event::outcome) {
            Some(Outcome::Levels { levels }) => {
                assert_eq!(levels, &vec![Some(1), Some(0), Some(1), Some(0), Some(1)]);
            }
            other => panic!("expected levels, got {other:?}"),
        }
    }

    #[test]
    fn test_removed_nodes_are_skipped() {
        let mut graph = two_components();
        graph.remove_node(3).unwrap();
        let events: Vec<Event> = bfs(&graph, 0, None).unwrap().collect();

        assert_eq!(visit_order(&events), vec![0, 1, 2, 4]);
        match events.last().and_then(Event::outcome) {
            Some(Outcome::Levels { levels }) => assert_eq!(levels[3], None),
            other => panic!("expected levels, got {other:?}"),
        }
    }

    #[test]
    fn test_targeted_stops_when_target_dequeued() {
        let graph = diamond();
        let events: Vec<Event> = bfs(&graph, 0, Some(3)).unwrap().collect();

        // 3 is discovered directly from 0 before 1 and 2 are dequeued
        assert_eq!(visit_order(&events), vec![0, 1, 2, 3]);
        let route = events
            .last()
            .and_then(Event::outcome)
            .and_then(Outcome::route)
            .unwrap();
        assert_eq!(route.nodes, vec![0, 3]);
        assert_eq!(route.distance, 5.0);
    }

    #[test]
    fn test_targeted_discover_events_follow_adjacency_order() {
        let graph = graph_from(&[(0.0, 0.0); 4], &[(0, 2, 1.0), (0, 1, 1.0), (1, 3, 1.0)]);
        let discovered: Vec<(NodeId, NodeId)> = bfs(&graph, 0, Some(3))
            .unwrap()
            .filter_map(|event| match event {
                Event::Discover { from, to, .. } => Some((from, to)),
                _ => None,
            })
            .collect();
        assert_eq!(discovered, vec![(0, 2), (0, 1), (1, 3)]);
    }

    #[test]
    fn test_targeted_other_component_is_no_path() {
        let graph = two_components();
        let events: Vec<Event> = bfs(&graph, 0, Some(4)).unwrap().collect();

        assert_eq!(visit_order(&events), vec![0, 1, 2]);
        assert!(events.last().and_then(Event::outcome).unwrap().is_no_path());
    }

    #[test]
    fn test_start_is_target() {
        let graph = diamond();
        let events: Vec<Event> = bfs(&graph, 2, Some(2)).unwrap().collect();
        assert_eq!(events.len(), 2);
        let route = events[1].outcome().and_then(Outcome::route).unwrap();
        assert_eq!(route.nodes, vec![2]);
    }

    #[test]
    fn test_visit_snapshot_reports_levels() {
        let graph = diamond();
        let mut trace = bfs(&graph, 0, None).unwrap();
        match trace.next() {
            Some(Event::Visit {
                node: 0,
                snapshot: Snapshot::Levels { levels },
                ..
            }) => assert_eq!(levels, vec![Some(0), None, None, None]),
            other => panic!("unexpected first event {other:?}"),
        }
        assert_eq!(trace.search().level(0), Some(0));
    }
}
