//! Pending-action queue
//!
//! Delayed work (next puzzle, staggered particle showers) is queued against
//! the session clock and fired from the frame update; nothing sleeps.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Work that fires at a later clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Action {
    /// Replace the solved board with a new puzzle
    RegeneratePuzzle,
    /// Particle burst at a random point on the playfield
    Burst { color: u32, count: u32 },
}

/// Fire time with a total order
#[derive(Debug, Clone, Copy)]
struct Due(f64);

impl PartialEq for Due {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Due {}

impl PartialOrd for Due {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Due {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Min-heap of actions keyed by (fire time, insertion order)
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    heap: BinaryHeap<Reverse<(Due, u64, Action)>>,
    next_seq: u64,
}

impl Schedule {
    pub fn push(&mut self, at: f64, action: Action) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((Due(at), seq, action)));
    }

    /// Pop the earliest action due at or before `now`
    pub fn pop_due(&mut self, now: f64) -> Option<Action> {
        let Reverse((due, _, _)) = self.heap.peek()?;
        if due.0 > now {
            return None;
        }
        self.heap.pop().map(|Reverse((_, _, action))| action)
    }

    /// Fire time of the earliest action
    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse((due, _, _))| due.0)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
