//! Seats at a multi-player table.
//!
//! ## SeatId
//!
//! Type-safe seat identifier; seat 0 is the human player, the rest are bots.
//!
//! ## SeatMap
//!
//! Per-seat data backed by a `Vec` for O(1) access, indexable by `SeatId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatId(pub u8);

impl SeatId {
    /// The human player's seat.
    pub const HUMAN: SeatId = SeatId(0);

    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_human(self) -> bool {
        self.0 == 0
    }

    /// The seat that plays after this one at a table of `seat_count`.
    #[must_use]
    pub fn next(self, seat_count: usize) -> SeatId {
        SeatId(((self.index() + 1) % seat_count.max(1)) as u8)
    }

    /// Iterate over all seats at a table of `seat_count`.
    ///
    /// ```
    /// use arcade_sim::core::SeatId;
    ///
    /// let seats: Vec<_> = SeatId::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert!(seats[0].is_human());
    /// ```
    pub fn all(seat_count: usize) -> impl Iterator<Item = SeatId> {
        (0..seat_count as u8).map(SeatId)
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_human() {
            f.write_str("You")
        } else {
            write!(f, "Bot {}", self.0)
        }
    }
}

/// Per-seat data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create with values from a factory function.
    ///
    /// An empty table is bumped to one seat.
    pub fn new(seat_count: usize, factory: impl Fn(SeatId) -> T) -> Self {
        let seat_count = seat_count.clamp(1, u8::MAX as usize);
        let data = (0..seat_count as u8).map(|i| factory(SeatId(i))).collect();
        Self { data }
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over `(SeatId, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SeatId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (SeatId(i as u8), v))
    }
}

impl<T> Index<SeatId> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: SeatId) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<SeatId> for SeatMap<T> {
    fn index_mut(&mut self, seat: SeatId) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_display() {
        assert_eq!(SeatId::new(0).to_string(), "You");
        assert_eq!(SeatId::new(2).to_string(), "Bot 2");
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(SeatId::new(0).next(4), SeatId::new(1));
        assert_eq!(SeatId::new(3).next(4), SeatId::new(0));
    }

    #[test]
    fn test_seat_map() {
        let mut map = SeatMap::new(4, |s| s.index() * 10);
        assert_eq!(map[SeatId::new(2)], 20);
        map[SeatId::new(2)] = 5;
        assert_eq!(map[SeatId::new(2)], 5);
        assert_eq!(map.seat_count(), 4);

        let pairs: Vec<_> = map.iter().map(|(s, v)| (s.index(), *v)).collect();
        assert_eq!(pairs, vec![(0, 0), (1, 10), (2, 5), (3, 30)]);
    }

    #[test]
    fn test_empty_table_bumped() {
        let map: SeatMap<u8> = SeatMap::new(0, |_| 0);
        assert_eq!(map.seat_count(), 1);
    }
}
