//! Graph algorithm implementations
//!
//! Every algorithm is a lazy, pull-driven sequence of [`Event`]s that ends
//! with exactly one [`Event::Done`]:
//! - `dijkstra`: Dijkstra and single-source A*
//! - `bidirectional`: bidirectional A* with a meeting-bound stop rule
//! - `bfs` / `dfs`: whole-graph and targeted traversals
//! - `mst`: Kruskal's minimum spanning forest
//! - `yen`: k-shortest loopless paths over repeated Dijkstra runs
//!
//! Invalid source/target identifiers are rejected before any search state
//! is allocated; an unreachable target is a normal `NoPath` outcome.

pub mod bfs;
pub mod bidirectional;
pub mod dfs;
pub mod dijkstra;
pub mod event;
pub mod frontier;
pub mod mst;
pub mod trace;
pub mod yen;

#[cfg(test)]
pub(crate) mod fixtures;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use bfs::{bfs, Bfs};
pub use bidirectional::{bidirectional_astar, Bidirectional};
pub use dfs::{dfs, Dfs};
pub use dijkstra::{astar, dijkstra, BestFirst};
pub use event::{Event, Outcome, Side, Snapshot};
pub use frontier::{Frontier, FrontierEntry};
pub use mst::{kruskal, Kruskal, UnionFind};
pub use trace::{Search, Trace};
pub use yen::{yen, YenPaths};

use crate::bail_usage;
use crate::config::TraceConfig;
use crate::error::{PathscopeError, Result};
use crate::graph::{Graph, NodeId};

/// Frontier entries captured per snapshot unless configured otherwise
pub const DEFAULT_SNAPSHOT_DEPTH: usize = 5;

/// Algorithms the engine can trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Dijkstra,
    Astar,
    BidirectionalAstar,
    Bfs,
    Dfs,
    Kruskal,
    Yen,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Dijkstra,
        Algorithm::Astar,
        Algorithm::BidirectionalAstar,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Kruskal,
        Algorithm::Yen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Astar => "astar",
            Algorithm::BidirectionalAstar => "bidirectional-astar",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Kruskal => "kruskal",
            Algorithm::Yen => "yen",
        }
    }

    pub fn needs_source(&self) -> bool {
        !matches!(self, Algorithm::Kruskal)
    }

    pub fn needs_target(&self) -> bool {
        matches!(self, Algorithm::BidirectionalAstar | Algorithm::Yen)
    }
}

impl FromStr for Algorithm {
    type Err = PathscopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" => Ok(Algorithm::Astar),
            "bidirectional-astar" | "astar2" => Ok(Algorithm::BidirectionalAstar),
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "kruskal" | "mst" => Ok(Algorithm::Kruskal),
            "yen" | "ksp" => Ok(Algorithm::Yen),
            other => Err(PathscopeError::invalid_value("algorithm", other)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One algorithm invocation: `(graph, source, target?, k?)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub algorithm: Algorithm,
    pub source: Option<NodeId>,
    pub target: Option<NodeId>,
    pub k: Option<usize>,
}

impl Request {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            source: None,
            target: None,
            k: None,
        }
    }

    pub fn source(mut self, source: NodeId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    fn require_source(&self) -> Result<NodeId> {
        match self.source {
            Some(source) => Ok(source),
            None => bail_usage!(format!("{} requires a source node", self.algorithm)),
        }
    }

    fn require_target(&self) -> Result<NodeId> {
        match self.target {
            Some(target) => Ok(target),
            None => bail_usage!(format!("{} requires a target node", self.algorithm)),
        }
    }
}

/// Boxed event sequence returned by [`trace`]
pub type EventStream<'g> = Box<dyn Iterator<Item = Event> + 'g>;

/// Start the algorithm named by `request`.
///
/// Fails before allocating any search state when the request names a
/// missing or removed node, lacks a required source/target, or asks Yen for
/// zero paths.
#[tracing::instrument(skip(graph, options), fields(algorithm = %request.algorithm))]
pub fn trace<'g>(
    graph: &'g mut Graph,
    request: &Request,
    options: &TraceConfig,
) -> Result<EventStream<'g>> {
    let depth = options.snapshot_depth;
    let stream: EventStream<'g> = match request.algorithm {
        Algorithm::Dijkstra => {
            let search = BestFirst::dijkstra(graph, request.require_source()?, request.target)?;
            Box::new(Trace::new(graph, search.with_snapshot_depth(depth)))
        }
        Algorithm::Astar => {
            let search = BestFirst::astar(graph, request.require_source()?, request.target)?;
            Box::new(Trace::new(graph, search.with_snapshot_depth(depth)))
        }
        Algorithm::BidirectionalAstar => {
            let search =
                Bidirectional::new(graph, request.require_source()?, request.require_target()?)?;
            Box::new(Trace::new(graph, search.with_snapshot_depth(depth)))
        }
        Algorithm::Bfs => Box::new(bfs(graph, request.require_source()?, request.target)?),
        Algorithm::Dfs => Box::new(dfs(graph, request.require_source()?, request.target)?),
        Algorithm::Kruskal => Box::new(kruskal(graph)),
        Algorithm::Yen => {
            let k = request.k.unwrap_or(options.default_k);
            let paths = YenPaths::new(graph, request.require_source()?, request.require_target()?, k)?;
            Box::new(paths.with_snapshot_depth(depth))
        }
    };
    Ok(stream)
}
