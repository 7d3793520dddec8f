//! Request normalization.
//!
//! Derived fields computed once per create/update request, before any
//! conflict or workflow check runs.
//!
//! | Field | Definition |
//! |-------|-----------|
//! | `duration_minutes` | `end_time - start_time` in minutes |
//! | `day_of_week` | Lowercase English weekday of `date` |
//! | `attendance_rate` | `round(actual / expected * 100, 2)` |

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::ScheduleRequest;

/// Fields derived from a schedule request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedFields {
    /// Scheduled length in minutes.
    pub duration_minutes: i64,
    /// Lowercase weekday name (e.g., "monday").
    pub day_of_week: String,
    /// Attendance percentage, when both head counts are known.
    pub attendance_rate: Option<f64>,
}

impl DerivedFields {
    /// Computes all derived fields of a request.
    pub fn from_request(request: &ScheduleRequest) -> Self {
        Self {
            duration_minutes: duration_minutes(request.start_time, request.end_time),
            day_of_week: day_of_week(request.date).to_string(),
            attendance_rate: attendance_rate(request.actual_attendees, request.expected_attendees),
        }
    }
}

/// Minutes from `start` to `end`. Negative if `end` precedes `start`.
#[inline]
pub fn duration_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    end.signed_duration_since(start).num_minutes()
}

/// Lowercase English weekday name of `date`.
pub fn day_of_week(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Attendance as a percentage of expected attendees, rounded to 2 decimals.
///
/// `None` unless both counts are present and `expected > 0`.
pub fn attendance_rate(actual: Option<u32>, expected: Option<u32>) -> Option<f64> {
    match (actual, expected) {
        (Some(actual), Some(expected)) if expected > 0 => {
            let pct = f64::from(actual) / f64::from(expected) * 100.0;
            Some((pct * 100.0).round() / 100.0)
        }
        _ => None,
    }
}
