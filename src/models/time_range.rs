//! Time-of-day ranges.
//!
//! # Time Model
//! Schedules are bounded to a single calendar day. A [`TimeRange`] is a
//! half-open interval `[start, end)` of wall-clock times on that day, so
//! a lecture ending at 10:30 and another starting at 10:30 may share a room.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A time-of-day interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Interval start (inclusive).
    pub start: NaiveTime,
    /// Interval end (exclusive).
    pub end: NaiveTime,
}

impl TimeRange {
    /// Creates a new time range.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether `start < end`.
    ///
    /// Ranges that wrap past midnight are not well formed.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Length of this range in whole minutes.
    ///
    /// Negative when the range is not well formed.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_minutes()
    }

    /// Whether a time falls within this range.
    #[inline]
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether two ranges share at least one instant.
    ///
    /// `[s1, e1)` and `[s2, e2)` overlap iff `s1 < e2 && s2 < e1`.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}
