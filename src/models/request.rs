//! Create/update request payload.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Schedule, ScheduleStatus, TimeRange};

/// A schedule create or update payload.
///
/// Updates carry the full record (replace semantics): a `None` room on an
/// update means "no room", not "leave the room unchanged".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Display title.
    pub title: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time of day.
    pub start_time: NaiveTime,
    /// End time of day.
    pub end_time: NaiveTime,
    /// Room to book.
    #[serde(default)]
    pub room_id: Option<String>,
    /// Teaching lecturer.
    pub lecturer_id: String,
    /// Course taught.
    #[serde(default)]
    pub course_id: Option<String>,
    /// Opaque class-group reference.
    #[serde(default)]
    pub class_id: Option<String>,
    /// Planned head count.
    #[serde(default)]
    pub expected_attendees: Option<u32>,
    /// Recorded head count.
    #[serde(default)]
    pub actual_attendees: Option<u32>,
    /// Requested status. `None` keeps the current one (or `draft` on create).
    #[serde(default)]
    pub status: Option<ScheduleStatus>,
    /// Required when `status` is `rejected`.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Lock or unlock the identifying fields. `None` keeps the current flag.
    ///
    /// The lock guards against accidental edits, not against the caller:
    /// any update may clear it, and the next update may then move the
    /// booking. Deciding who may unlock is up to the request handler. The
    /// lock still applies to the request that clears it.
    #[serde(default)]
    pub is_locked: Option<bool>,
}

impl ScheduleRequest {
    /// Creates a minimal request.
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        lecturer_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date,
            start_time,
            end_time,
            room_id: None,
            lecturer_id: lecturer_id.into(),
            course_id: None,
            class_id: None,
            expected_attendees: None,
            actual_attendees: None,
            status: None,
            rejection_reason: None,
            is_locked: None,
        }
    }

    /// Starts an update from a stored schedule, leaving the status as is.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            title: schedule.title.clone(),
            date: schedule.date,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            room_id: schedule.room_id.clone(),
            lecturer_id: schedule.lecturer_id.clone(),
            course_id: schedule.course_id.clone(),
            class_id: schedule.class_id.clone(),
            expected_attendees: schedule.expected_attendees,
            actual_attendees: schedule.actual_attendees,
            status: None,
            rejection_reason: None,
            is_locked: None,
        }
    }

    /// Renames the booking.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Clears the room.
    pub fn without_room(mut self) -> Self {
        self.room_id = None;
        self
    }

    /// Sets the lecturer.
    pub fn with_lecturer(mut self, lecturer_id: impl Into<String>) -> Self {
        self.lecturer_id = lecturer_id.into();
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

    /// Moves the booking to another date.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Moves the booking to another time range.
    pub fn between(mut self, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
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

    /// Requests a status.
    pub fn with_status(mut self, status: ScheduleStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the rejection reason.
    pub fn with_rejection_reason(mut self, reason: impl Into<String>) -> Self {
        self.rejection_reason = Some(reason.into());
        self
    }

    /// Requests the lock flag.
    pub fn with_lock(mut self, locked: bool) -> Self {
        self.is_locked = Some(locked);
        self
    }

    /// Requested time range.
    #[inline]
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}
