//! Schedule record model.
//!
//! A schedule is a persisted booking of one lecturer (and optionally one
//! room) for a time range on a calendar date. Records are owned by the
//! storage collaborator; this crate only reads them and decides whether a
//! change to them is allowed.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{ScheduleStatus, TimeRange};
use crate::normalize;

/// A persisted schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Unique schedule identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time of day (inclusive).
    pub start_time: NaiveTime,
    /// End time of day (exclusive).
    pub end_time: NaiveTime,
    /// Booked room, if any.
    pub room_id: Option<String>,
    /// Teaching lecturer.
    pub lecturer_id: String,
    /// Course taught, if any.
    pub course_id: Option<String>,
    /// Opaque class-group reference.
    pub class_id: Option<String>,
    /// Workflow status.
    pub status: ScheduleStatus,
    /// When set, identifying fields may no longer change.
    pub is_locked: bool,
    /// Planned head count.
    pub expected_attendees: Option<u32>,
    /// Recorded head count, once held.
    pub actual_attendees: Option<u32>,
    /// Why an approver turned this schedule down.
    pub rejection_reason: Option<String>,
}

impl Schedule {
    /// Creates a draft schedule without a room.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        lecturer_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            date,
            start_time,
            end_time,
            room_id: None,
            lecturer_id: lecturer_id.into(),
            course_id: None,
            class_id: None,
            status: ScheduleStatus::Draft,
            is_locked: false,
            expected_attendees: None,
            actual_attendees: None,
            rejection_reason: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Books a room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Sets the course.
    pub fn with_course(mut self, course_id: impl Into<String>) -> Self {
        self.course_id = Some(course_id.into());
        self
    }

    /// Sets the class group.
    pub fn with_class(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = Some(class_id.into());
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: ScheduleStatus) -> Self {
        self.status = status;
        self
    }

    /// Locks the identifying fields.
    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }

    /// Sets the planned head count.
    pub fn with_expected_attendees(mut self, n: u32) -> Self {
        self.expected_attendees = Some(n);
        self
    }

    /// Sets the recorded head count.
    pub fn with_actual_attendees(mut self, n: u32) -> Self {
        self.actual_attendees = Some(n);
        self
    }

    /// Time range on `date`.
    #[inline]
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Scheduled length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        normalize::duration_minutes(self.start_time, self.end_time)
    }

    /// Lowercase weekday name of `date`.
    pub fn day_of_week(&self) -> &'static str {
        normalize::day_of_week(self.date)
    }

    /// Attendance percentage, when both head counts are known.
    pub fn attendance_rate(&self) -> Option<f64> {
        normalize::attendance_rate(self.actual_attendees, self.expected_attendees)
    }

    /// Whether this schedule occupies its resources during `range` on `date`.
    ///
    /// Cancelled schedules occupy nothing.
    pub fn occupies(&self, date: NaiveDate, range: &TimeRange) -> bool {
        self.status.blocks_resources() && self.date == date && self.time_range().overlaps(range)
    }
}
