//! Conflict-check candidate.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{ScheduleRequest, TimeRange};

/// A proposed booking, checked against stored schedules.
///
/// Exists only for the duration of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCandidate {
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time of day. Callers guarantee `start_time < end_time`.
    pub start_time: NaiveTime,
    /// End time of day.
    pub end_time: NaiveTime,
    /// Room to book. No room = no room check.
    pub room_id: Option<String>,
    /// Lecturer to book.
    pub lecturer_id: String,
    /// The schedule being updated, ignored when scanning for conflicts.
    pub exclude_schedule_id: Option<String>,
    /// Planned head count, checked against room capacity.
    pub expected_attendees: Option<u32>,
}

impl ScheduleCandidate {
    /// Creates a candidate without a room.
    pub fn new(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        lecturer_id: impl Into<String>,
    ) -> Self {
        Self {
            date,
            start_time,
            end_time,
            room_id: None,
            lecturer_id: lecturer_id.into(),
            exclude_schedule_id: None,
            expected_attendees: None,
        }
    }

    /// Builds the candidate a request would book.
    pub fn from_request(request: &ScheduleRequest) -> Self {
        Self {
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            room_id: request.room_id.clone(),
            lecturer_id: request.lecturer_id.clone(),
            exclude_schedule_id: None,
            expected_attendees: request.expected_attendees,
        }
    }

    /// Sets the room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Ignores the schedule with this id (the one being updated).
    pub fn excluding(mut self, schedule_id: impl Into<String>) -> Self {
        self.exclude_schedule_id = Some(schedule_id.into());
        self
    }

    /// Sets the planned head count.
    pub fn with_expected_attendees(mut self, n: u32) -> Self {
        self.expected_attendees = Some(n);
        self
    }

    /// Requested time range.
    #[inline]
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Whether `schedule_id` is the one this candidate replaces.
    #[inline]
    pub fn is_excluded(&self, schedule_id: &str) -> bool {
        self.exclude_schedule_id.as_deref() == Some(schedule_id)
    }
}
