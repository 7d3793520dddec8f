//! Schedule field names.
//!
//! Validation failures are keyed by the request field they concern, so a
//! caller can attach each message to the right input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A field of a schedule request or record.
///
/// Ordered by declaration, which is the order errors are grouped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Date,
    StartTime,
    EndTime,
    RoomId,
    LecturerId,
    CourseId,
    ClassId,
    ExpectedAttendees,
    ActualAttendees,
    Status,
    RejectionReason,
}

impl Field {
    /// Snake-case field name, as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Date => "date",
            Field::StartTime => "start_time",
            Field::EndTime => "end_time",
            Field::RoomId => "room_id",
            Field::LecturerId => "lecturer_id",
            Field::CourseId => "course_id",
            Field::ClassId => "class_id",
            Field::ExpectedAttendees => "expected_attendees",
            Field::ActualAttendees => "actual_attendees",
            Field::Status => "status",
            Field::RejectionReason => "rejection_reason",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
