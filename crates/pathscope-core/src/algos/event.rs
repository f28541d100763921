//! Trace events emitted by every search.

use serde::Serialize;

use super::frontier::FrontierEntry;
use crate::graph::{Edge, NodeId, Route};

/// Which half of a bidirectional search produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Forward,
    Backward,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Forward => Side::Backward,
            Side::Backward => Side::Forward,
        }
    }
}

/// Observable search state captured alongside an event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Snapshot {
    Empty,
    /// Smallest pending frontier entries, ascending by key
    Frontier { top: Vec<FrontierEntry> },
    Bidirectional {
        forward: Vec<FrontierEntry>,
        backward: Vec<FrontierEntry>,
    },
    /// BFS hop levels per node, `None` while undiscovered
    Levels { levels: Vec<Option<u32>> },
    /// DFS entry/exit timestamps per node
    Timestamps {
        entry: Vec<Option<u32>>,
        exit: Vec<Option<u32>>,
    },
}

/// Terminal result carried by [`Event::Done`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Found {
        route: Route,
    },
    NoPath,
    /// Best distance per node for a search without a target
    Distances {
        distances: Vec<Option<f64>>,
    },
    Levels {
        levels: Vec<Option<u32>>,
    },
    Timestamps {
        entry: Vec<Option<u32>>,
        exit: Vec<Option<u32>>,
    },
    SpanningTree {
        edges: Vec<Edge>,
        total_weight: f64,
    },
    Ranked {
        count: usize,
        routes: Vec<Route>,
    },
}

impl Outcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            Outcome::Found { route } => Some(route),
            _ => None,
        }
    }

    pub fn is_no_path(&self) -> bool {
        matches!(self, Outcome::NoPath)
    }
}

/// One atomic step of an algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A node was finalized (or dequeued / entered, for traversals)
    Visit {
        node: NodeId,
        #[serde(skip_serializing_if = "Option::is_none")]
        side: Option<Side>,
        snapshot: Snapshot,
    },
    /// A neighbor's best-known distance improved
    Relax {
        from: NodeId,
        to: NodeId,
        #[serde(skip_serializing_if = "Option::is_none")]
        side: Option<Side>,
        snapshot: Snapshot,
    },
    /// A traversal reached an unvisited node over `from → to`
    Discover {
        from: NodeId,
        to: NodeId,
        snapshot: Snapshot,
    },
    /// DFS finished a node's subtree
    Exit { node: NodeId, snapshot: Snapshot },
    MstAdd { u: NodeId, v: NodeId, weight: f64 },
    MstSkip { u: NodeId, v: NodeId, weight: f64 },
    /// Yen confirmed its `rank`-th shortest path
    PathFound { rank: usize, route: Route },
    /// An event of a nested search, forwarded with a progress message
    Subsearch { message: String, event: Box<Event> },
    Done { outcome: Outcome },
}

impl Event {
    pub fn is_done(&self) -> bool {
        matches!(self, Event::Done { .. })
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Event::Done { outcome } => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_tags() {
        let event = Event::Visit {
            node: 3,
            side: Some(Side::Backward),
            snapshot: Snapshot::Empty,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "visit");
        assert_eq!(json["node"], 3);
        assert_eq!(json["side"], "backward");
        assert_eq!(json["snapshot"]["kind"], "empty");
    }

    #[test]
    fn test_side_omitted_for_single_direction() {
        let event = Event::Relax {
            from: 0,
            to: 1,
            side: None,
            snapshot: Snapshot::Empty,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("side").is_none());
    }

    #[test]
    fn test_done_outcome_json() {
        let event = Event::Done {
            outcome: Outcome::Found {
                route: Route::new(vec![0, 1, 2], 2.0),
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "done");
        assert_eq!(json["outcome"]["result"], "found");
        assert_eq!(json["outcome"]["route"]["nodes"], serde_json::json!([0, 1, 2]));
        assert!(event.is_done());
        assert_eq!(event.outcome().and_then(Outcome::route).unwrap().hops(), 2);
    }

    #[test]
    fn test_subsearch_nests_event() {
        let event = Event::Subsearch {
            message: "k=2".into(),
            event: Box::new(Event::Done {
                outcome: Outcome::NoPath,
            }),
        };
        assert!(!event.is_done());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"]["outcome"]["result"], "no_path");
    }
}
