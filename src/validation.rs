//! Request validation for schedule create/update.
//!
//! The single entry point a request handler calls before persisting a
//! schedule. Runs every check and reports all failures at once, each keyed
//! by the request field it concerns:
//! - Time range well formed (`end_time` after `start_time`)
//! - Date not in the past (create only, per policy)
//! - Duration within policy bounds
//! - Room exists and seats the expected attendees
//! - No room or lecturer double-booking
//! - Locked fields untouched (update only)
//! - Status transition allowed, with a reason when rejecting
//! - Actual attendance only recorded on completed schedules
//!
//! Overlap checks are skipped when the time range itself is invalid, and
//! when the schedule will be cancelled once saved.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SchedulingPolicy;
use crate::conflict::{ConflictChecker, GuardViolation};
use crate::error::ScheduleError;
use crate::models::{Field, Schedule, ScheduleCandidate, ScheduleRequest, ScheduleStatus};
use crate::normalize::DerivedFields;
use crate::repository::ScheduleRepository;
use crate::workflow::{ScheduleStateMachine, WorkflowError};

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Request field the error is attached to.
    pub field: Field,
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Room already booked for an overlapping range.
    RoomConflict,
    /// Lecturer already teaching during an overlapping range.
    LecturerConflict,
    /// Slot shorter or longer than policy allows.
    DurationOutOfRange,
    /// More expected attendees than seats.
    CapacityExceeded,
    /// Requested status not reachable from the current one.
    InvalidTransition,
    /// Rejection without a reason.
    MissingReason,
    /// Edit of a frozen field on a locked schedule.
    LockedScheduleViolation,
    /// End time not after start time.
    InvalidTimeRange,
    /// New schedule dated before today.
    DateInPast,
    /// Requested room does not exist.
    UnknownRoom,
    /// Actual attendance recorded before completion.
    AttendanceNotAllowed,
}

impl ValidationError {
    fn new(field: Field, kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

impl From<WorkflowError> for ValidationError {
    fn from(err: WorkflowError) -> Self {
        let kind = match err {
            WorkflowError::InvalidTransition { .. } => ValidationErrorKind::InvalidTransition,
            WorkflowError::MissingReason => ValidationErrorKind::MissingReason,
            WorkflowError::LockedScheduleViolation { .. } => {
                ValidationErrorKind::LockedScheduleViolation
            }
        };
        Self::new(err.field(), kind, err.to_string())
    }
}

impl From<GuardViolation> for ValidationError {
    fn from(violation: GuardViolation) -> Self {
        let (field, kind) = match violation {
            GuardViolation::DurationOutOfRange { .. } => {
                (Field::EndTime, ValidationErrorKind::DurationOutOfRange)
            }
            GuardViolation::CapacityExceeded { .. } => {
                (Field::ExpectedAttendees, ValidationErrorKind::CapacityExceeded)
            }
            GuardViolation::UnknownRoom { .. } => (Field::RoomId, ValidationErrorKind::UnknownRoom),
        };
        Self::new(field, kind, violation.to_string())
    }
}

/// Groups error messages by field, in [`Field`] declaration order.
///
/// The shape a request handler returns as its validation error body; keys
/// serialize as snake_case field names.
pub fn messages_by_field(errors: &[ValidationError]) -> BTreeMap<Field, Vec<String>> {
    let mut grouped: BTreeMap<Field, Vec<String>> = BTreeMap::new();
    for e in errors {
        grouped
            .entry(e.field)
            .or_default()
            .push(e.message.clone());
    }
    grouped
}

/// Caller-supplied context of a validation pass.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Wall-clock "now"; past-date checks compare against its date.
    pub now: NaiveDateTime,
    /// The stored schedule when updating; `None` when creating.
    pub existing: Option<&'a Schedule>,
}

impl<'a> ValidationContext<'a> {
    /// Context for creating a new schedule.
    pub fn create(now: NaiveDateTime) -> Self {
        Self {
            now,
            existing: None,
        }
    }

    /// Context for updating `existing`.
    pub fn update(now: NaiveDateTime, existing: &'a Schedule) -> Self {
        Self {
            now,
            existing: Some(existing),
        }
    }

    /// Today's date.
    #[inline]
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }
}

/// Outcome of a successful validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRequest {
    /// Status the schedule will have once saved.
    pub status: ScheduleStatus,
    /// Lock flag the schedule will have once saved.
    pub is_locked: bool,
    /// Normalized fields.
    pub derived: DerivedFields,
}

/// Validates schedule requests against stored schedules.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Room, Schedule, ScheduleRequest, ScheduleStatus};
/// use u_timetable::repository::InMemoryScheduleStore;
/// use u_timetable::validation::{RequestValidator, ValidationContext, ValidationErrorKind};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let now = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_time(at(8, 0));
///
/// let store = InMemoryScheduleStore::new()
///     .with_room(Room::new("R1").with_capacity(40))
///     .with_schedule(
///         Schedule::new("S1", date, at(9, 0), at(10, 30), "L1")
///             .with_room("R1")
///             .with_status(ScheduleStatus::Approved),
///     );
/// let validator = RequestValidator::new(&store);
///
/// let request = ScheduleRequest::new("Databases", date, at(10, 0), at(11, 0), "L2").with_room("R1");
/// let err = validator.validate(&request, &ValidationContext::create(now)).unwrap_err();
/// let errors = err.validation_errors().unwrap();
/// assert_eq!(errors[0].kind, ValidationErrorKind::RoomConflict);
/// ```
#[derive(Debug, Clone)]
pub struct RequestValidator<R> {
    checker: ConflictChecker<R>,
    state_machine: ScheduleStateMachine,
}

impl<R: ScheduleRepository> RequestValidator<R> {
    /// Creates a validator with the default policy.
    pub fn new(repository: R) -> Self {
        Self {
            checker: ConflictChecker::new(repository),
            state_machine: ScheduleStateMachine::new(),
        }
    }

    /// Sets the scheduling policy.
    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.checker = self.checker.with_policy(policy);
        self
    }

    /// Validates a create (no `existing` in `ctx`) or update request.
    ///
    /// # Returns
    /// The resolved status, lock flag and derived fields if every check
    /// passes; `ScheduleError::Validation` with all failures otherwise;
    /// `ScheduleError::Repository` if storage could not be read.
    pub fn validate(
        &self,
        request: &ScheduleRequest,
        ctx: &ValidationContext<'_>,
    ) -> Result<ValidatedRequest, ScheduleError> {
        let mut errors = Vec::new();
        let policy = self.checker.policy();

        let mut candidate = ScheduleCandidate::from_request(request);
        if let Some(existing) = ctx.existing {
            candidate = candidate.excluding(existing.id.as_str());
        }

        let window_ok = if !candidate.time_range().is_well_formed() {
            errors.push(ValidationError::new(
                Field::EndTime,
                ValidationErrorKind::InvalidTimeRange,
                "end time must be after start time",
            ));
            false
        } else if let Some(violation) = self.checker.check_duration(&candidate) {
            errors.push(violation.into());
            false
        } else {
            true
        };

        if ctx.existing.is_none() && policy.reject_past_dates && request.date < ctx.today() {
            errors.push(ValidationError::new(
                Field::Date,
                ValidationErrorKind::DateInPast,
                format!("date {} is before today ({})", request.date, ctx.today()),
            ));
        }

        if let Some(violation) = self.checker.check_capacity(&candidate)? {
            errors.push(violation.into());
        }

        let mut workflow_errors = Vec::new();
        let status = match ctx.existing {
            Some(existing) => self.check_update(existing, request, &mut workflow_errors),
            None => self.check_create(request, &mut workflow_errors),
        };

        // A schedule that ends up cancelled occupies nothing.
        if window_ok && status.blocks_resources() {
            let conflicts = self.checker.check_conflicts(&candidate)?;
            if conflicts.room_conflict {
                errors.push(ValidationError::new(
                    Field::RoomId,
                    ValidationErrorKind::RoomConflict,
                    format!(
                        "room {} is already booked at this time",
                        candidate.room_id.as_deref().unwrap_or_default()
                    ),
                ));
            }
            if conflicts.lecturer_conflict {
                errors.push(ValidationError::new(
                    Field::LecturerId,
                    ValidationErrorKind::LecturerConflict,
                    format!(
                        "lecturer {} is already scheduled at this time",
                        candidate.lecturer_id
                    ),
                ));
            }
            if conflicts.has_conflict() {
                debug!(conflicting = ?conflicts.conflicting_schedule_ids, "double booking detected");
            }
        }

        errors.extend(workflow_errors);

        if request.actual_attendees.is_some() && status != ScheduleStatus::Completed {
            errors.push(ValidationError::new(
                Field::ActualAttendees,
                ValidationErrorKind::AttendanceNotAllowed,
                "actual attendees can only be recorded on a completed schedule",
            ));
        }

        if !errors.is_empty() {
            warn!(error_count = errors.len(), "schedule request rejected");
            return Err(ScheduleError::Validation(errors));
        }

        let is_locked = request
            .is_locked
            .or(ctx.existing.map(|s| s.is_locked))
            .unwrap_or(false);
        Ok(ValidatedRequest {
            status,
            is_locked,
            derived: DerivedFields::from_request(request),
        })
    }

    /// New schedules start as `draft`, or go straight to `submitted`.
    fn check_create(
        &self,
        request: &ScheduleRequest,
        errors: &mut Vec<ValidationError>,
    ) -> ScheduleStatus {
        let requested = request.status.unwrap_or_default();
        match requested {
            ScheduleStatus::Draft | ScheduleStatus::Submitted => requested,
            _ => {
                errors.push(
                    WorkflowError::InvalidTransition {
                        from: ScheduleStatus::Draft,
                        to: requested,
                    }
                    .into(),
                );
                ScheduleStatus::Draft
            }
        }
    }

    /// Lock check first, then the transition; both are reported.
    ///
    /// Requesting the current status is no transition at all.
    fn check_update(
        &self,
        existing: &Schedule,
        request: &ScheduleRequest,
        errors: &mut Vec<ValidationError>,
    ) -> ScheduleStatus {
        if let Err(e) = self.state_machine.check_locked_fields(existing, request) {
            errors.push(e.into());
        }

        match request.status {
            Some(requested) if requested != existing.status => {
                match self.state_machine.apply_transition(
                    existing,
                    requested,
                    request.rejection_reason.as_deref(),
                ) {
                    Ok(status) => status,
                    Err(e) => {
                        errors.push(e.into());
                        existing.status
                    }
                }
            }
            _ => existing.status,
        }
    }
}
