//! Yen's k-shortest loopless paths.
//!
//! Each spur evaluation opens a mutation window on the graph: edges that
//! would recreate an already known route are cut, and the root path before
//! the spur node is isolated. A Dijkstra sub-search then runs on the
//! mutated graph and its events are forwarded wrapped in
//! [`Event::Subsearch`]. The window is closed as soon as the sub-search
//! finishes, and on drop if the iterator is abandoned mid-window, so the
//! graph is never left mutated.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::dijkstra::BestFirst;
use super::event::{Event, Outcome};
use super::trace::Search;
use super::DEFAULT_SNAPSHOT_DEPTH;
use crate::bail_invalid;
use crate::error::Result;
use crate::graph::{EdgeJournal, Graph, NodeId, Route};

#[derive(Debug, Clone)]
struct Candidate {
    route: Route,
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// First shortest path not searched yet
    Initial,
    /// Next spur position along the last confirmed route
    Spur { index: usize },
}

#[derive(Debug, Clone, PartialEq)]
enum Origin {
    First,
    Spur { root: Vec<NodeId>, root_cost: f64 },
}

#[derive(Debug)]
struct SubSearch {
    search: BestFirst,
    message: String,
    origin: Origin,
}

/// Lazy k-shortest-paths event sequence over a mutably borrowed graph
pub struct YenPaths<'g> {
    graph: &'g mut Graph,
    source: NodeId,
    target: NodeId,
    k: usize,
    confirmed: Vec<Route>,
    pool: Vec<Candidate>,
    next_seq: u64,
    phase: Phase,
    sub: Option<SubSearch>,
    window: Option<EdgeJournal>,
    snapshot_depth: usize,
    pending: VecDeque<Event>,
    finished: bool,
}

impl<'g> YenPaths<'g> {
    /// Validate the request; no search work happens until the first pull.
    #[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
    pub fn new(graph: &'g mut Graph, source: NodeId, target: NodeId, k: usize) -> Result<Self> {
        graph.require_node(source, "source")?;
        graph.require_node(target, "target")?;
        if k == 0 {
            bail_invalid!("k", "0 (at least one path must be requested)");
        }

        Ok(Self {
            graph,
            source,
            target,
            k,
            confirmed: Vec::new(),
            pool: Vec::new(),
            next_seq: 0,
            phase: Phase::Initial,
            sub: None,
            window: None,
            snapshot_depth: DEFAULT_SNAPSHOT_DEPTH,
            pending: VecDeque::new(),
            finished: false,
        })
    }

    /// Frontier depth for the snapshots of every sub-search
    pub fn with_snapshot_depth(mut self, depth: usize) -> Self {
        self.snapshot_depth = depth;
        self
    }

    /// Routes confirmed so far, cheapest first
    pub fn confirmed(&self) -> &[Route] {
        &self.confirmed
    }

    fn step(&mut self) {
        if self.sub.is_some() {
            self.drive_subsearch();
            return;
        }
        match self.phase {
            Phase::Initial => self.start_first(),
            Phase::Spur { index } => {
                let spur_count = self.confirmed.last().map_or(0, Route::hops);
                if index < spur_count {
                    self.phase = Phase::Spur { index: index + 1 };
                    self.start_spur(index);
                } else {
                    self.confirm_next();
                }
            }
        }
    }

    fn start_first(&mut self) {
        match BestFirst::dijkstra(self.graph, self.source, Some(self.target)) {
            Ok(search) => {
                self.sub = Some(SubSearch {
                    search: search.with_snapshot_depth(self.snapshot_depth),
                    message: "Searching for shortest path (k=1)".to_string(),
                    origin: Origin::First,
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "first search could not start");
                self.finish(Outcome::NoPath);
            }
        }
    }

    /// Open a mutation window for the spur at `index` of the last confirmed
    /// route and start its sub-search.
    fn start_spur(&mut self, index: usize) {
        let Some(previous) = self.confirmed.last() else {
            return;
        };
        let root: Vec<NodeId> = previous.nodes[..=index].to_vec();
        let spur = root[index];
        let Some(root_cost) = self.graph.path_cost(&root) else {
            tracing::warn!(spur, "root path has a missing edge, skipping spur");
            return;
        };

        let mut journal = EdgeJournal::new();
        let known = self
            .confirmed
            .iter()
            .chain(self.pool.iter().map(|candidate| &candidate.route));
        for route in known {
            if route.nodes.len() > index + 1 && route.nodes[..=index] == root[..] {
                journal.cut_edge(self.graph, spur, route.nodes[index + 1]);
            }
        }
        for &node in &root[..index] {
            journal.isolate_node(self.graph, node);
        }
        tracing::trace!(spur, hidden = journal.len(), "mutation_window_opened");

        match BestFirst::dijkstra(self.graph, spur, Some(self.target)) {
            Ok(search) => {
                self.window = Some(journal);
                self.sub = Some(SubSearch {
                    search: search.with_snapshot_depth(self.snapshot_depth),
                    message: format!(
                        "Searching for candidate path (k={}, spur={spur})",
                        self.confirmed.len() + 1
                    ),
                    origin: Origin::Spur { root, root_cost },
                });
            }
            Err(err) => {
                tracing::warn!(spur, error = %err, "spur search could not start");
                journal.restore(self.graph);
            }
        }
    }

    /// Pull one unit of work from the running sub-search and forward its
    /// events. Closes the window once the sub-search is done.
    fn drive_subsearch(&mut self) {
        let Some(sub) = self.sub.as_mut() else {
            return;
        };
        let mut events = VecDeque::new();
        sub.search.advance(self.graph, &mut events);

        let mut result = None;
        for event in events {
            if let Event::Done { outcome } = &event {
                result = Some(outcome.clone());
            }
            self.pending.push_back(Event::Subsearch {
                message: sub.message.clone(),
                event: Box::new(event),
            });
        }
        if !sub.search.is_finished() {
            return;
        }

        let origin = sub.origin.clone();
        self.sub = None;
        self.close_window();
        let route = result.as_ref().and_then(Outcome::route).cloned();
        match origin {
            Origin::First => match route {
                Some(route) => self.accept(route),
                None => self.finish(Outcome::NoPath),
            },
            Origin::Spur { root, root_cost } => {
                if let Some(spur_route) = route {
                    self.offer(root, root_cost, spur_route);
                }
            }
        }
    }

    fn close_window(&mut self) {
        if let Some(journal) = self.window.take() {
            journal.restore(self.graph);
        }
    }

    /// Join `root` (minus the spur) with the spur route and add it to the
    /// pool unless the same node sequence is already known.
    fn offer(&mut self, root: Vec<NodeId>, root_cost: f64, spur_route: Route) {
        let mut nodes = root;
        nodes.pop();
        nodes.extend_from_slice(&spur_route.nodes);
        let distance = root_cost + spur_route.distance;

        let duplicate = self.confirmed.iter().any(|route| route.nodes == nodes)
            || self.pool.iter().any(|c| c.route.nodes == nodes);
        if duplicate {
            tracing::debug!(?nodes, distance, "candidate_rejected");
            return;
        }
        tracing::debug!(?nodes, distance, "candidate_accepted");
        self.pool.push(Candidate {
            route: Route::new(nodes, distance),
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    fn confirm_next(&mut self) {
        let best = self
            .pool
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.route
                    .distance
                    .total_cmp(&b.route.distance)
                    .then(a.seq.cmp(&b.seq))
            })
            .map(|(index, _)| index);
        match best {
            Some(index) => {
                let candidate = self.pool.remove(index);
                self.accept(candidate.route);
            }
            None => self.finish_ranked(),
        }
    }

    fn accept(&mut self, route: Route) {
        self.confirmed.push(route.clone());
        self.pending.push_back(Event::PathFound {
            rank: self.confirmed.len(),
            route,
        });
        if self.confirmed.len() >= self.k {
            self.finish_ranked();
        } else {
            self.phase = Phase::Spur { index: 0 };
        }
    }

    fn finish_ranked(&mut self) {
        self.finish(Outcome::Ranked {
            count: self.confirmed.len(),
            routes: self.confirmed.clone(),
        });
    }

    fn finish(&mut self, outcome: Outcome) {
        tracing::debug!(
            source = self.source,
            target = self.target,
            requested = self.k,
            found = self.confirmed.len(),
            "yen_done"
        );
        self.pending.push_back(Event::Done { outcome });
        self.finished = true;
    }
}

impl Iterator for YenPaths<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.finished {
                return None;
            }
            self.step();
        }
    }
}

impl FusedIterator for YenPaths<'_> {}

impl Drop for YenPaths<'_> {
    fn drop(&mut self) {
        if self.window.is_some() {
            tracing::trace!("restoring abandoned mutation window");
        }
        self.close_window();
    }
}

/// Yen's event sequence for up to `k` shortest loopless routes
pub fn yen(graph: &mut Graph, source: NodeId, target: NodeId, k: usize) -> Result<YenPaths<'_>> {
    YenPaths::new(graph, source, target, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algos::fixtures::{diamond, graph_from, triangle, two_components};
    use crate::error::PathscopeError;

    fn ranked(events: &[Event]) -> Vec<Route> {
        match events.last().and_then(Event::outcome) {
            Some(Outcome::Ranked { count, routes }) => {
                assert_eq!(*count, routes.len());
                routes.clone()
            }
            other => panic!("expected ranked outcome, got {other:?}"),
        }
    }

    fn costs(routes: &[Route]) -> Vec<f64> {
        routes.iter().map(|r| r.distance).collect()
    }

    #[test]
    fn test_diamond_two_paths() {
        let mut graph = diamond();
        let events: Vec<Event> = yen(&mut graph, 0, 3, 2).unwrap().collect();
        let routes = ranked(&events);

        assert_eq!(costs(&routes), vec![2.0, 2.0]);
        assert_ne!(routes[0].nodes, routes[1].nodes);
        assert!(routes.iter().all(|r| r.hops() == 2));
    }

    #[test]
    fn test_diamond_third_path_is_direct_edge() {
        let mut graph = diamond();
        let events: Vec<Event> = yen(&mut graph, 0, 3, 3).unwrap().collect();
        let routes = ranked(&events);

        assert_eq!(costs(&routes), vec![2.0, 2.0, 5.0]);
        assert_eq!(routes[2].nodes, vec![0, 3]);
    }

    #[test]
    fn test_fewer_paths_than_requested() {
        let mut graph = triangle();
        let events: Vec<Event> = yen(&mut graph, 0, 2, 5).unwrap().collect();
        let routes = ranked(&events);

        assert_eq!(costs(&routes), vec![2.0, 5.0]);
        let found: Vec<usize> = events
            .iter()
            .filter_map(|event| match event {
                Event::PathFound { rank, .. } => Some(*rank),
                _ => None,
            })
            .collect();
        assert_eq!(found, vec![1, 2]);
    }

    #[test]
    fn test_unreachable_target_is_no_path() {
        let mut graph = two_components();
        let events: Vec<Event> = yen(&mut graph, 0, 4, 3).unwrap().collect();
        assert!(events.last().and_then(Event::outcome).unwrap().is_no_path());
        assert!(!events.iter().any(|e| matches!(e, Event::PathFound { .. })));
    }

    #[test]
    fn test_zero_k_rejected() {
        let mut graph = diamond();
        assert!(matches!(
            yen(&mut graph, 0, 3, 0),
            Err(PathscopeError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_single_done_and_wrapped_subsearches() {
        let mut graph = diamond();
        let events: Vec<Event> = yen(&mut graph, 0, 3, 3).unwrap().collect();

        assert_eq!(events.iter().filter(|e| e.is_done()).count(), 1);
        match &events[0] {
            Event::Subsearch { message, event } => {
                assert_eq!(message, "Searching for shortest path (k=1)");
                assert!(matches!(**event, Event::Visit { node: 0, .. }));
            }
            other => panic!("expected forwarded event, got {other:?}"),
        }
        let spur_messages = events.iter().any(|event| {
            matches!(event, Event::Subsearch { message, .. }
                if message.starts_with("Searching for candidate path (k=2, spur="))
        });
        assert!(spur_messages);
    }

    #[test]
    fn test_graph_restored_after_full_run() {
        let mut graph = diamond();
        let before = graph.clone();
        let events: Vec<Event> = yen(&mut graph, 0, 3, 3).unwrap().collect();
        assert!(!events.is_empty());
        assert_eq!(graph, before);
    }

    #[test]
    fn test_graph_restored_when_abandoned_mid_window() {
        let mut graph = graph_from(
            &[(0.0, 0.0); 6],
            &[
                (0, 1, 1.0),
                (1, 5, 1.0),
                (0, 2, 1.0),
                (2, 5, 2.0),
                (1, 3, 1.0),
                (3, 4, 1.0),
                (4, 5, 1.0),
            ],
        );
        let before = graph.clone();

        let mut paths = yen(&mut graph, 0, 5, 4).unwrap();
        let mut pulled = 0;
        for event in paths.by_ref() {
            pulled += 1;
            // Stop partway through the first spur search
            if matches!(&event, Event::Subsearch { message, .. } if message.contains("spur=1"))
            {
                break;
            }
        }
        assert!(paths.window.is_some());
        drop(paths);

        assert!(pulled > 0);
        assert_eq!(graph, before);
    }

    #[test]
    fn test_routes_are_loopless_and_sorted() {
        let mut graph = graph_from(
            &[(0.0, 0.0); 6],
            &[
                (0, 1, 1.0),
                (1, 5, 1.0),
                (0, 2, 1.0),
                (2, 5, 2.0),
                (1, 3, 1.0),
                (3, 4, 1.0),
                (4, 5, 1.0),
                (2, 3, 0.5),
            ],
        );
        let events: Vec<Event> = yen(&mut graph, 0, 5, 10).unwrap().collect();
        let routes = ranked(&events);

        assert!(routes.len() >= 4);
        for pair in routes.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
        for route in &routes {
            let mut nodes = route.nodes.clone();
            nodes.sort_unstable();
            nodes.dedup();
            assert_eq!(nodes.len(), route.nodes.len());
            assert_eq!(graph.path_cost(&route.nodes), Some(route.distance));
        }
    }
}
