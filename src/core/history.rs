//! Bounded, newest-first round history.
//!
//! Uses an `im::Vector` so cloning a game (and with it its history) is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

/// Recent-history list that keeps at most `capacity` entries.
///
/// ```
/// use arcade_sim::core::RoundHistory;
///
/// let mut history = RoundHistory::new(2);
/// history.push(1.5);
/// history.push(2.0);
/// history.push(3.0);
///
/// let recent: Vec<_> = history.iter().copied().collect();
/// assert_eq!(recent, vec![3.0, 2.0]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundHistory<T: Clone> {
    entries: Vector<T>,
    capacity: usize,
}

impl<T: Clone> RoundHistory<T> {
    /// Create an empty history. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity: capacity.max(1),
        }
    }

    /// Create a history pre-filled with `seed` entries, newest first.
    #[must_use]
    pub fn with_entries(capacity: usize, seed: impl IntoIterator<Item = T>) -> Self {
        let mut history = Self::new(capacity);
        for entry in seed.into_iter().take(history.capacity) {
            history.entries.push_back(entry);
        }
        history
    }

    /// Record an entry as the newest, dropping the oldest past capacity.
    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Newest entry.
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Iterate newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_newest_first() {
        let mut history = RoundHistory::new(3);
        for i in 0..5 {
            history.push(i);
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.latest(), Some(&4));
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2]);
    }

    #[test]
    fn test_with_entries_truncates() {
        let history = RoundHistory::with_entries(2, vec!['R', 'B', 'T']);
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec!['R', 'B']);
    }

    #[test]
    fn test_zero_capacity() {
        let mut history = RoundHistory::new(0);
        history.push(1);
        history.push(2);
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.latest(), Some(&2));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut history = RoundHistory::new(4);
        history.push(1);
        let snapshot = history.clone();
        history.push(2);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(history.len(), 2);
    }
}
