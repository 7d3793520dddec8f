//! Schedule status workflow and field locking.
//!
//! # Transition Table
//!
//! | Current | Allowed next |
//! |---------|--------------|
//! | draft | submitted, cancelled |
//! | submitted | draft, approved, rejected, cancelled |
//! | approved | cancelled, completed |
//! | rejected | draft, submitted |
//! | cancelled | draft, submitted |
//! | completed | (terminal) |
//!
//! Any pair not listed is refused, including staying in the same status.
//!
//! # Locking
//!
//! A locked schedule keeps its identifying fields ([`LOCKED_FIELDS`])
//! frozen whatever its status. The lock check is separate from, and runs
//! before, transition validation.

use thiserror::Error;

use crate::models::{Field, Schedule, ScheduleRequest, ScheduleStatus};

/// Fields frozen on a locked schedule, in reporting order.
pub const LOCKED_FIELDS: [Field; 7] = [
    Field::Title,
    Field::Date,
    Field::StartTime,
    Field::EndTime,
    Field::RoomId,
    Field::LecturerId,
    Field::CourseId,
];

/// Refused workflow operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// `to` is not reachable from `from`.
    #[error("cannot change status from {from} to {to}")]
    InvalidTransition {
        from: ScheduleStatus,
        to: ScheduleStatus,
    },
    /// Rejection without a reason.
    #[error("a rejection reason is required")]
    MissingReason,
    /// Attempt to change a frozen field.
    #[error("schedule is locked: {field} cannot be changed")]
    LockedScheduleViolation { field: Field },
}

impl WorkflowError {
    /// Request field the error concerns.
    pub fn field(&self) -> Field {
        match self {
            WorkflowError::InvalidTransition { .. } => Field::Status,
            WorkflowError::MissingReason => Field::RejectionReason,
            WorkflowError::LockedScheduleViolation { field } => *field,
        }
    }
}

/// Statuses reachable in one step from `status`.
pub fn allowed_transitions(status: ScheduleStatus) -> &'static [ScheduleStatus] {
    use crate::models::ScheduleStatus::*;
    match status {
        Draft => &[Submitted, Cancelled],
        Submitted => &[Draft, Approved, Rejected, Cancelled],
        Approved => &[Cancelled, Completed],
        Rejected => &[Draft, Submitted],
        Cancelled => &[Draft, Submitted],
        Completed => &[],
    }
}

/// Decides which status changes and field edits a schedule accepts.
///
/// Stateless. Persisting the new status is left to the storage collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleStateMachine;

impl ScheduleStateMachine {
    /// Creates a state machine.
    pub fn new() -> Self {
        Self
    }

    /// Whether `requested` is reachable from `current` in one step.
    pub fn can_transition(&self, current: ScheduleStatus, requested: ScheduleStatus) -> bool {
        allowed_transitions(current).contains(&requested)
    }

    /// Whether no transition leaves `status`.
    pub fn is_terminal(&self, status: ScheduleStatus) -> bool {
        allowed_transitions(status).is_empty()
    }

    /// Validates moving `schedule` to `requested`.
    ///
    /// Rejecting needs a non-blank `reason`. Returns the new status.
    pub fn apply_transition(
        &self,
        schedule: &Schedule,
        requested: ScheduleStatus,
        reason: Option<&str>,
    ) -> Result<ScheduleStatus, WorkflowError> {
        if !self.can_transition(schedule.status, requested) {
            return Err(WorkflowError::InvalidTransition {
                from: schedule.status,
                to: requested,
            });
        }
        if requested == ScheduleStatus::Rejected && reason.map_or(true, |r| r.trim().is_empty()) {
            return Err(WorkflowError::MissingReason);
        }
        Ok(requested)
    }

    /// Refuses an update that edits a frozen field of a locked schedule.
    ///
    /// Names the first changed field in [`LOCKED_FIELDS`] order. Unlocked
    /// schedules accept any edit.
    pub fn check_locked_fields(
        &self,
        schedule: &Schedule,
        request: &ScheduleRequest,
    ) -> Result<(), WorkflowError> {
        if !schedule.is_locked {
            return Ok(());
        }
        match LOCKED_FIELDS
            .into_iter()
            .find(|&field| changes(schedule, request, field))
        {
            Some(field) => Err(WorkflowError::LockedScheduleViolation { field }),
            None => Ok(()),
        }
    }
}

/// Whether `request` gives a locked `field` a different value than `schedule` holds.
fn changes(schedule: &Schedule, request: &ScheduleRequest, field: Field) -> bool {
    match field {
        Field::Title => schedule.title != request.title,
        Field::Date => schedule.date != request.date,
        Field::StartTime => schedule.start_time != request.start_time,
        Field::EndTime => schedule.end_time != request.end_time,
        Field::RoomId => schedule.room_id != request.room_id,
        Field::LecturerId => schedule.lecturer_id != request.lecturer_id,
        Field::CourseId => schedule.course_id != request.course_id,
        _ => false,
    }
}
