//! Pull-driven event sequences.
//!
//! A [`Search`] keeps its own transient state but never stores the graph;
//! it receives the graph on every [`Search::advance`] call. [`Trace`] binds
//! a search to a borrowed graph and exposes it as an iterator, while Yen's
//! orchestrator drives inner searches over a graph it holds mutably.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::event::Event;
use crate::graph::Graph;

/// A resumable algorithm producing events in causal order
pub trait Search {
    /// Perform one unit of work and append the events it caused to `out`.
    /// Appends the terminal `Done` exactly once; calls after that are no-ops.
    fn advance(&mut self, graph: &Graph, out: &mut VecDeque<Event>);

    /// True once `Done` has been emitted
    fn is_finished(&self) -> bool;
}

/// Iterator over the events of a search against a borrowed graph
pub struct Trace<'g, S> {
    graph: &'g Graph,
    search: S,
    pending: VecDeque<Event>,
}

impl<'g, S: Search> Trace<'g, S> {
    pub fn new(graph: &'g Graph, search: S) -> Self {
        Self {
            graph,
            search,
            pending: VecDeque::new(),
        }
    }

    /// Borrow the underlying search state
    pub fn search(&self) -> &S {
        &self.search
    }
}

impl<S: Search> Iterator for Trace<'_, S> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.search.is_finished() {
                return None;
            }
            self.search.advance(self.graph, &mut self.pending);
        }
    }
}

impl<S: Search> FusedIterator for Trace<'_, S> {}
