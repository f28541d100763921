//! Depth-first traversal with entry/exit timestamps.
//!
//! Exploration follows recursive stack discipline on an explicit stack:
//! neighbors are tried in adjacency order and each child's subtree is
//! finished before the next sibling is attempted. One shared counter stamps
//! both entries and exits.

use std::collections::VecDeque;

use super::event::{Event, Outcome, Snapshot};
use super::trace::{Search, Trace};
use crate::error::Result;
use crate::graph::types::walk_parents;
use crate::graph::{Graph, NodeId, Route};

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    /// Index of the next adjacency entry to try
    cursor: usize,
}

#[derive(Debug, Clone)]
pub struct Dfs {
    start: NodeId,
    target: Option<NodeId>,
    entry: Vec<Option<u32>>,
    exit: Vec<Option<u32>>,
    parent: Vec<Option<NodeId>>,
    cost: Vec<f64>,
    stack: Vec<Frame>,
    timer: u32,
    started: bool,
    next_root: NodeId,
    found: bool,
    finished: bool,
}

impl Dfs {
    #[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
    pub fn new(graph: &Graph, start: NodeId, target: Option<NodeId>) -> Result<Self> {
        graph.require_node(start, "source")?;
        if let Some(target) = target {
            graph.require_node(target, "target")?;
        }

        let n = graph.node_count();
        Ok(Self {
            start,
            target,
            entry: vec![None; n],
            exit: vec![None; n],
            parent: vec![None; n],
            cost: vec![0.0; n],
            stack: Vec::new(),
            timer: 0,
            started: false,
            next_root: 0,
            found: false,
            finished: false,
        })
    }

    /// Entry and exit timestamps of `node`
    pub fn timestamps(&self, node: NodeId) -> (Option<u32>, Option<u32>) {
        (
            self.entry.get(node).copied().flatten(),
            self.exit.get(node).copied().flatten(),
        )
    }

    fn tick(&mut self) -> u32 {
        let now = self.timer;
        self.timer += 1;
        now
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Timestamps {
            entry: self.entry.clone(),
            exit: self.exit.clone(),
        }
    }

    fn enter(&mut self, node: NodeId, out: &mut VecDeque<Event>) {
        self.entry[node] = Some(self.tick());
        out.push_back(Event::Visit {
            node,
            side: None,
            snapshot: self.snapshot(),
        });

        if self.target == Some(node) {
            self.leave(node, out);
            self.found = true;
            self.finish(out);
        } else {
            self.stack.push(Frame { node, cursor: 0 });
        }
    }

    fn leave(&mut self, node: NodeId, out: &mut VecDeque<Event>) {
        self.exit[node] = Some(self.tick());
        out.push_back(Event::Exit {
            node,
            snapshot: self.snapshot(),
        });
    }

    /// Next present, unentered node in identity order
    fn next_component(&mut self, graph: &Graph) -> Option<NodeId> {
        while self.next_root < self.entry.len() {
            let candidate = self.next_root;
            self.next_root += 1;
            if graph.contains(candidate) && self.entry[candidate].is_none() {
                return Some(candidate);
            }
        }
        None
    }

    /// Descend into the next unentered neighbor of the top frame, or close
    /// the frame when its adjacency is exhausted.
    fn step(&mut self, graph: &Graph, out: &mut VecDeque<Event>) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        let node = frame.node;
        let neighbors = graph.neighbors(node);

        while frame.cursor < neighbors.len() {
            let adjacent = neighbors[frame.cursor];
            frame.cursor += 1;
            if self.entry[adjacent.node].is_none() {
                let next = adjacent.node;
                self.parent[next] = Some(node);
                self.cost[next] = self.cost[node] + adjacent.weight;
                out.push_back(Event::Discover {
                    from: node,
                    to: next,
                    snapshot: self.snapshot(),
                });
                self.enter(next, out);
                return;
            }
        }

        self.stack.pop();
        self.leave(node, out);
    }

    fn finish(&mut self, out: &mut VecDeque<Event>) {
        let outcome = match self.target {
            None => Outcome::Timestamps {
                entry: self.entry.clone(),
                exit: self.exit.clone(),
            },
            Some(target) if self.found => Outcome::Found {
                route: Route::new(walk_parents(&self.parent, target), self.cost[target]),
            },
            Some(_) => Outcome::NoPath,
        };
        tracing::debug!(
            start = self.start,
            target = ?self.target,
            ticks = self.timer,
            "dfs_done"
        );
        out.push_back(Event::Done { outcome });
        self.finished = true;
    }
}

impl Search for Dfs {
    fn advance(&mut self, graph: &Graph, out: &mut VecDeque<Event>) {
        if self.finished {
            return;
        }
        if !self.stack.is_empty() {
            self.step(graph, out);
            return;
        }

        let root = if !self.started {
            self.started = true;
            Some(self.start)
        } else if self.target.is_none() {
            self.next_component(graph)
        } else {
            None
        };
        match root {
            Some(root) => self.enter(root, out),
            None => self.finish(out),
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Depth-first event sequence from `start`, to `target` if given
pub fn dfs(graph: &Graph, start: NodeId, target: Option<NodeId>) -> Result<Trace<'_, Dfs>> {
    Ok(Trace::new(graph, Dfs::new(graph, start, target)?))
}
