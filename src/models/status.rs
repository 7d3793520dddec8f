//! Schedule status.
//!
//! The closed set of states a schedule record moves through. Which moves
//! are legal is decided by [`ScheduleStateMachine`](crate::workflow::ScheduleStateMachine).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of a schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// Being edited; not yet visible to approvers.
    #[default]
    Draft,
    /// Awaiting approval.
    Submitted,
    /// Approved and binding.
    Approved,
    /// Turned down by an approver (carries a rejection reason).
    Rejected,
    /// Withdrawn. Frees its room and lecturer.
    Cancelled,
    /// Held. Terminal.
    Completed,
}

/// A status name that is not one of the six known statuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown schedule status: {0}")]
pub struct UnknownStatus(pub String);

impl ScheduleStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [ScheduleStatus; 6] = [
        ScheduleStatus::Draft,
        ScheduleStatus::Submitted,
        ScheduleStatus::Approved,
        ScheduleStatus::Rejected,
        ScheduleStatus::Cancelled,
        ScheduleStatus::Completed,
    ];

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleStatus::Draft => "draft",
            ScheduleStatus::Submitted => "submitted",
            ScheduleStatus::Approved => "approved",
            ScheduleStatus::Rejected => "rejected",
            ScheduleStatus::Cancelled => "cancelled",
            ScheduleStatus::Completed => "completed",
        }
    }

    /// Whether a schedule in this status occupies its room and lecturer.
    ///
    /// Everything except `cancelled` takes part in conflict detection.
    #[inline]
    pub fn blocks_resources(self) -> bool {
        self != ScheduleStatus::Cancelled
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScheduleStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
