//! Dijkstra and single-source A*.
//!
//! Both share one best-first loop; A* only changes the frontier key from
//! `g` to `g + h`, where `h` is the straight-line distance to the target.
//! Without a target, `h = 0` and A* behaves exactly like Dijkstra.

use std::collections::VecDeque;

use super::event::{Event, Outcome, Snapshot};
use super::frontier::{Frontier, FrontierEntry};
use super::trace::{Search, Trace};
use super::DEFAULT_SNAPSHOT_DEPTH;
use crate::error::Result;
use crate::graph::types::walk_parents;
use crate::graph::{Graph, NodeId, Position, Route};

/// Best-first search state for one Dijkstra or A* invocation
#[derive(Debug, Clone)]
pub struct BestFirst {
    source: NodeId,
    target: Option<NodeId>,
    goal: Option<Position>,
    dist: Vec<f64>,
    parent: Vec<Option<NodeId>>,
    closed: Vec<bool>,
    frontier: Frontier,
    snapshot_depth: usize,
    finished: bool,
}

impl BestFirst {
    /// Plain Dijkstra from `source`, stopping early at `target` if given
    #[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
    pub fn dijkstra(graph: &Graph, source: NodeId, target: Option<NodeId>) -> Result<Self> {
        Self::start(graph, source, target, false)
    }

    /// A* guided by the straight-line distance to `target`
    #[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
    pub fn astar(graph: &Graph, source: NodeId, target: Option<NodeId>) -> Result<Self> {
        Self::start(graph, source, target, true)
    }

    fn start(graph: &Graph, source: NodeId, target: Option<NodeId>, guided: bool) -> Result<Self> {
        graph.require_node(source, "source")?;
        if let Some(target) = target {
            graph.require_node(target, "target")?;
        }

        let n = graph.node_count();
        let mut search = Self {
            source,
            target,
            goal: target.filter(|_| guided).and_then(|t| graph.position(t)),
            dist: vec![f64::INFINITY; n],
            parent: vec![None; n],
            closed: vec![false; n],
            frontier: Frontier::new(),
            snapshot_depth: DEFAULT_SNAPSHOT_DEPTH,
            finished: false,
        };
        search.dist[source] = 0.0;
        let key = search.estimate(graph, source);
        search.frontier.push(FrontierEntry {
            node: source,
            key,
            cost: 0.0,
        });
        Ok(search)
    }

    /// Number of frontier entries captured per snapshot
    pub fn with_snapshot_depth(mut self, depth: usize) -> Self {
        self.snapshot_depth = depth;
        self
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Best distance found so far for `node`
    pub fn distance(&self, node: NodeId) -> Option<f64> {
        self.dist.get(node).copied().filter(|d| d.is_finite())
    }

    fn estimate(&self, graph: &Graph, node: NodeId) -> f64 {
        match (self.goal, graph.position(node)) {
            (Some(goal), Some(position)) => position.distance(&goal),
            _ => 0.0,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Frontier {
            top: self.frontier.peek_top_k(self.snapshot_depth),
        }
    }

    fn relax_neighbors(&mut self, graph: &Graph, node: NodeId, out: &mut VecDeque<Event>) {
        let base = self.dist[node];
        for entry in graph.neighbors(node) {
            let next = entry.node;
            if self.closed[next] {
                continue;
            }
            let candidate = base + entry.weight;
            if candidate < self.dist[next] {
                self.dist[next] = candidate;
                self.parent[next] = Some(node);
                self.frontier.push(FrontierEntry {
                    node: next,
                    key: candidate + self.estimate(graph, next),
                    cost: candidate,
                });
                out.push_back(Event::Relax {
                    from: node,
                    to: next,
                    side: None,
                    snapshot: self.snapshot(),
                });
            }
        }
    }

    fn finish(&mut self, out: &mut VecDeque<Event>) {
        let outcome = match self.target {
            None => Outcome::Distances {
                distances: (0..self.dist.len()).map(|n| self.distance(n)).collect(),
            },
            Some(target) if self.dist[target].is_infinite() => Outcome::NoPath,
            Some(target) => Outcome::Found {
                route: Route::new(walk_parents(&self.parent, target), self.dist[target]),
            },
        };
        tracing::debug!(
            source = self.source,
            target = ?self.target,
            closed = self.closed.iter().filter(|c| **c).count(),
            no_path = outcome.is_no_path(),
            "best_first_done"
        );
        out.push_back(Event::Done { outcome });
        self.finished = true;
    }
}

impl Search for BestFirst {
    fn advance(&mut self, graph: &Graph, out: &mut VecDeque<Event>) {
        if self.finished {
            return;
        }
        while let Some(entry) = self.frontier.pop_min() {
            let node = entry.node;
            // Stale entry for a node finalized earlier
            if self.closed[node] {
                continue;
            }
            self.closed[node] = true;
            out.push_back(Event::Visit {
                node,
                side: None,
                snapshot: self.snapshot(),
            });

            if self.target == Some(node) {
                self.finish(out);
            } else {
                self.relax_neighbors(graph, node, out);
            }
            return;
        }
        self.finish(out);
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Dijkstra's event sequence from `source`, to `target` if given
pub fn dijkstra(
    graph: &Graph,
    source: NodeId,
    target: Option<NodeId>,
) -> Result<Trace<'_, BestFirst>> {
    Ok(Trace::new(graph, BestFirst::dijkstra(graph, source, target)?))
}

/// A*'s event sequence from `source`, to `target` if given
pub fn astar(graph: &Graph, source: NodeId, target: Option<NodeId>) -> Result<Trace<'_, BestFirst>> {
    Ok(Trace::new(graph, BestFirst::astar(graph, source, target)?))
}
