//! Deferred callbacks on the single-threaded round clock.
//!
//! Nothing in the core sleeps. "Do X in a second" is a [`Deferred`] entry
//! keyed by its due tick and tagged with the round it belongs to; the entry
//! fires from `on_tick` and no-ops if that round is no longer active.

use std::collections::BTreeMap;

use game_core::{RoundId, Tick};

/// Work that waits for a later tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Run the per-player skill cycle.
    AssignSkills,
}

/// A callback whose due tick has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DueCallback {
    pub due: Tick,
    pub round: RoundId,
    pub task: Deferred,
}

/// Tick-ordered callback queue.
///
/// Entries with the same due tick fire in scheduling order.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BTreeMap<(Tick, u64), (RoundId, Deferred)>,
    seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Tick, round: RoundId, task: Deferred) {
        self.queue.insert((due, self.seq), (round, task));
        self.seq += 1;
    }

    /// Removes and returns every entry due at or before `now`, in due order.
    pub fn drain_due(&mut self, now: Tick) -> Vec<DueCallback> {
        let due = match now.0.checked_add(1) {
            Some(next) => {
                let later = self.queue.split_off(&(Tick(next), 0));
                std::mem::replace(&mut self.queue, later)
            }
            None => std::mem::take(&mut self.queue),
        };
        due.into_iter()
            .map(|((due, _), (round, task))| DueCallback { due, round, task })
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
