//! Closed, 1-based coordinate pairs.

use std::fmt;

/// A closed `[start, stop]` interval in 1-based reference coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: i64,
    pub stop: i64,
}

impl Interval {
    #[must_use]
    pub const fn new(start: i64, stop: i64) -> Self {
        Self { start, stop }
    }

    /// Number of bases covered, counting both ends.
    #[must_use]
    pub fn length(&self) -> u64 {
        (self.stop - self.start).unsigned_abs() + 1
    }

    /// Strict interior overlap: true iff one of `self`'s ends lies strictly
    /// between `other`'s ends. Sharing a boundary base does not count, and
    /// neither does `self` swallowing `other` whole (see [`Interval::contains`]).
    #[must_use]
    pub fn overlaps(&self, other: &Interval) -> bool {
        let inside = |pos: i64| pos > other.start && pos < other.stop;
        inside(self.start) || inside(self.stop)
    }

    /// Closed-interval intersection: at least one base in common.
    #[must_use]
    pub fn intersects(&self, other: &Interval) -> bool {
        self.start <= other.stop && other.start <= self.stop
    }

    /// `self` covers every base of `other`.
    #[must_use]
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.stop <= self.stop
    }

    #[must_use]
    pub fn contains_pos(&self, pos: i64) -> bool {
        self.start <= pos && pos <= self.stop
    }

    /// Shift by `offset` when the interval starts at or after `threshold`;
    /// when only the stop reaches the threshold, shift only the stop.
    pub fn shift(&mut self, offset: i64, threshold: i64) {
        if self.start >= threshold {
            self.start += offset;
            self.stop += offset;
        } else if self.stop >= threshold {
            self.stop += offset;
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.stop)
    }
}
