//! Fixed-capacity FIFO of recently selected modifier names.

use std::collections::VecDeque;

/// No-repeat window over the last `capacity` selections.
///
/// Eviction is FIFO by count, not by time: once a name falls out of the
/// window it is immediately eligible again. The window is only ever used as
/// an exclusion set for the next draw, never replayed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryWindow {
    capacity: usize,
    entries: VecDeque<String>,
}

impl HistoryWindow {
    /// Creates a window holding at most `capacity` names.
    ///
    /// A capacity of zero disables the no-repeat rule: `record` keeps nothing
    /// and `contains` is always false.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    /// Appends a selection, evicting the oldest entry once over capacity.
    pub fn record(&mut self, name: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_back(name.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Returns true if `name` is inside the window.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry == name)
    }

    /// Empties the window.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }
}
