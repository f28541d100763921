//! Pathscope Core Library
//!
//! Instrumented graph-search engine: shortest paths, traversals, spanning
//! trees and k-shortest paths, each exposed as a lazy, replayable sequence
//! of algorithm events.

pub mod algos;
pub mod config;
pub mod error;
pub mod graph;
pub mod logging;

pub use algos::{trace, Algorithm, Event, Outcome, Request};
pub use error::{PathscopeError, Result};
pub use graph::{Graph, NodeId, Position, Route};
