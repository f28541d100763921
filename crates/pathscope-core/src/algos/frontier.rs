//! Min-priority frontier with lazy deletion.
//!
//! There is no decrease-key: an improved distance is pushed as a new entry
//! and the search skips entries for nodes it has already closed. Ties on the
//! key pop in insertion order so traces are reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::graph::NodeId;

/// Pending frontier entry. `key` orders the frontier; `cost` is the
/// accumulated path cost (`g`) the entry was pushed with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrontierEntry {
    pub node: NodeId,
    pub key: f64,
    pub cost: f64,
}

#[derive(Debug, Clone)]
struct Slot {
    entry: FrontierEntry,
    seq: u64,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slot {
    // Reversed so the max-heap pops the smallest key, then the oldest entry
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .entry
            .key
            .total_cmp(&self.entry.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: BinaryHeap<Slot>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: FrontierEntry) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Slot { entry, seq });
    }

    /// Remove and return the entry with the smallest key
    pub fn pop_min(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|slot| slot.entry)
    }

    pub fn peek_min(&self) -> Option<&FrontierEntry> {
        self.heap.peek().map(|slot| &slot.entry)
    }

    /// The `k` smallest entries, ascending, without modifying the frontier
    pub fn peek_top_k(&self, k: usize) -> Vec<FrontierEntry> {
        let mut slots: Vec<&Slot> = self.heap.iter().collect();
        slots.sort_unstable_by(|a, b| b.cmp(a));
        slots.into_iter().take(k).map(|slot| slot.entry).collect()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
