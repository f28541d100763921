//! Bidirectional A*.
//!
//! A forward search from the source and a backward search from the target
//! run against their own frontiers and alternate by smallest top key. Both
//! sides use balanced potentials built from the two straight-line
//! heuristics:
//!
//! ```text
//! p_fwd(v) = (|v - target| - |v - source|) / 2      p_bwd(v) = -p_fwd(v)
//! ```
//!
//! so that `p_fwd + p_bwd = 0` everywhere. With these keys the stop rule
//! "best meeting cost <= top_fwd + top_bwd" is the bidirectional Dijkstra
//! rule on the reduced graph, and the reported route is optimal for
//! consistent heuristics. A meeting candidate is recorded whenever a side
//! labels a node the other side has already reached.

use std::collections::VecDeque;

use super::event::{Event, Outcome, Side, Snapshot};
use super::frontier::{Frontier, FrontierEntry};
use super::trace::{Search, Trace};
use super::DEFAULT_SNAPSHOT_DEPTH;
use crate::error::Result;
use crate::graph::types::walk_parents;
use crate::graph::{Graph, NodeId, Position, Route};

/// Per-direction search state
#[derive(Debug, Clone)]
struct Half {
    g: Vec<f64>,
    parent: Vec<Option<NodeId>>,
    closed: Vec<bool>,
    frontier: Frontier,
}

impl Half {
    fn new(n: usize, root: NodeId, key: f64) -> Self {
        let mut half = Self {
            g: vec![f64::INFINITY; n],
            parent: vec![None; n],
            closed: vec![false; n],
            frontier: Frontier::new(),
        };
        half.g[root] = 0.0;
        half.frontier.push(FrontierEntry {
            node: root,
            key,
            cost: 0.0,
        });
        half
    }

    /// Drop stale entries sitting on top of the frontier
    fn purge(&mut self) {
        while let Some(top) = self.frontier.peek_min() {
            if !self.closed[top.node] {
                break;
            }
            self.frontier.pop_min();
        }
    }

    fn top_key(&self) -> Option<f64> {
        self.frontier.peek_min().map(|entry| entry.key)
    }
}

/// Balanced potential of `node` for one side, given `(source, target)` positions
fn potential(ends: (Position, Position), graph: &Graph, side: Side, node: NodeId) -> f64 {
    let Some(position) = graph.position(node) else {
        return 0.0;
    };
    let (source, target) = ends;
    let forward = (position.distance(&target) - position.distance(&source)) / 2.0;
    match side {
        Side::Forward => forward,
        Side::Backward => -forward,
    }
}

#[derive(Debug, Clone, Copy)]
struct Meeting {
    node: NodeId,
    cost: f64,
}

/// Bidirectional A* state for one source/target pair
#[derive(Debug, Clone)]
pub struct Bidirectional {
    source: NodeId,
    target: NodeId,
    ends: (Position, Position),
    forward: Half,
    backward: Half,
    best: Option<Meeting>,
    snapshot_depth: usize,
    finished: bool,
}

impl Bidirectional {
    #[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
    pub fn new(graph: &Graph, source: NodeId, target: NodeId) -> Result<Self> {
        graph.require_node(source, "source")?;
        graph.require_node(target, "target")?;

        let n = graph.node_count();
        let ends = (
            graph.position(source).unwrap_or_default(),
            graph.position(target).unwrap_or_default(),
        );
        let mut search = Self {
            source,
            target,
            ends,
            forward: Half::new(n, source, potential(ends, graph, Side::Forward, source)),
            backward: Half::new(n, target, potential(ends, graph, Side::Backward, target)),
            best: None,
            snapshot_depth: DEFAULT_SNAPSHOT_DEPTH,
            finished: false,
        };
        if source == target {
            search.best = Some(Meeting {
                node: source,
                cost: 0.0,
            });
        }
        Ok(search)
    }

    /// Number of frontier entries captured per side in each snapshot
    pub fn with_snapshot_depth(mut self, depth: usize) -> Self {
        self.snapshot_depth = depth;
        self
    }

    /// Cheapest meeting cost recorded so far
    pub fn best_cost(&self) -> Option<f64> {
        self.best.map(|meeting| meeting.cost)
    }

    fn halves(&mut self, side: Side) -> (&mut Half, &Half) {
        match side {
            Side::Forward => (&mut self.forward, &self.backward),
            Side::Backward => (&mut self.backward, &self.forward),
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Bidirectional {
            forward: self.forward.frontier.peek_top_k(self.snapshot_depth),
            backward: self.backward.frontier.peek_top_k(self.snapshot_depth),
        }
    }

    fn offer(&mut self, node: NodeId, cost: f64) {
        if self.best.is_none_or(|best| cost < best.cost) {
            tracing::trace!(node, cost, "meeting_improved");
            self.best = Some(Meeting { node, cost });
        }
    }

    fn relax_neighbors(&mut self, graph: &Graph, side: Side, node: NodeId, out: &mut VecDeque<Event>) {
        for entry in graph.neighbors(node) {
            let next = entry.node;
            let bias = potential(self.ends, graph, side, next);
            let (this, other) = self.halves(side);
            if this.closed[next] {
                continue;
            }
            let candidate = this.g[node] + entry.weight;
            if candidate >= this.g[next] {
                continue;
            }
            this.g[next] = candidate;
            this.parent[next] = Some(node);
            this.frontier.push(FrontierEntry {
                node: next,
                key: candidate + bias,
                cost: candidate,
            });
            let across = other.g[next];
            if across.is_finite() {
                self.offer(next, candidate + across);
            }
            out.push_back(Event::Relax {
                from: node,
                to: next,
                side: Some(side),
                snapshot: self.snapshot(),
            });
        }
    }

    fn route(&self, meeting: Meeting) -> Route {
        let mut nodes = walk_parents(&self.forward.parent, meeting.node);
        let mut current = meeting.node;
        while let Some(next) = self.backward.parent[current] {
            nodes.push(next);
            current = next;
        }
        Route::new(nodes, meeting.cost)
    }

    fn finish(&mut self, out: &mut VecDeque<Event>) {
        let outcome = match self.best {
            Some(meeting) => Outcome::Found {
                route: self.route(meeting),
            },
            None => Outcome::NoPath,
        };
        tracing::debug!(
            source = self.source,
            target = self.target,
            meeting = ?self.best.map(|m| m.node),
            no_path = outcome.is_no_path(),
            "bidirectional_done"
        );
        out.push_back(Event::Done { outcome });
        self.finished = true;
    }
}

impl Search for Bidirectional {
    fn advance(&mut self, graph: &Graph, out: &mut VecDeque<Event>) {
        if self.finished {
            return;
        }
        self.forward.purge();
        self.backward.purge();

        let (Some(top_forward), Some(top_backward)) =
            (self.forward.top_key(), self.backward.top_key())
        else {
            self.finish(out);
            return;
        };
        if self
            .best
            .is_some_and(|best| top_forward + top_backward >= best.cost)
        {
            self.finish(out);
            return;
        }

        let side = if top_forward <= top_backward {
            Side::Forward
        } else {
            Side::Backward
        };
        let (this, other) = self.halves(side);
        let Some(entry) = this.frontier.pop_min() else {
            return;
        };
        let node = entry.node;
        this.closed[node] = true;
        let met = other.closed[node].then(|| this.g[node] + other.g[node]);

        out.push_back(Event::Visit {
            node,
            side: Some(side),
            snapshot: self.snapshot(),
        });
        match met {
            Some(cost) => self.offer(node, cost),
            None => self.relax_neighbors(graph, side, node, out),
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Bidirectional A*'s event sequence from `source` to `target`
pub fn bidirectional_astar(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
) -> Result<Trace<'_, Bidirectional>> {
    Ok(Trace::new(graph, Bidirectional::new(graph, source, target)?))
}
