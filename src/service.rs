//! Check-then-write schedule service.
//!
//! Validation alone cannot prevent double booking: two requests for the
//! same slot may both pass the conflict scan before either is saved. The
//! service closes that gap by holding one commit guard across the whole
//! validate → save window, so at most one non-cancelled schedule ever
//! occupies a given room or lecturer interval.
//!
//! Storage backends with an exclusion constraint or serializable
//! transactions may enforce the same guarantee themselves; the guard is
//! still correct on top of them.

use chrono::NaiveDateTime;
use parking_lot::Mutex;
use tracing::info;

use crate::config::SchedulingPolicy;
use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{Schedule, ScheduleRequest, ScheduleStatus};
use crate::repository::{RepositoryError, ScheduleStore};
use crate::validation::{RequestValidator, ValidatedRequest, ValidationContext};

/// Validates and persists schedules.
#[derive(Debug)]
pub struct ScheduleService<S> {
    store: S,
    policy: SchedulingPolicy,
    commit: Mutex<()>,
}

impl<S: ScheduleStore> ScheduleService<S> {
    /// Creates a service with the default policy.
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: SchedulingPolicy::default(),
            commit: Mutex::new(()),
        }
    }

    /// Sets the scheduling policy.
    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates and saves a new schedule under `id`.
    pub fn create(
        &self,
        id: impl Into<String>,
        request: ScheduleRequest,
        now: NaiveDateTime,
    ) -> ScheduleResult<Schedule> {
        let id = id.into();
        let _guard = self.commit.lock();

        if self.store.find(&id)?.is_some() {
            return Err(RepositoryError::Conflict(format!("schedule {id} already exists")).into());
        }

        let validated = self.validator().validate(&request, &ValidationContext::create(now))?;
        let schedule = build_schedule(id, request, validated, None);
        self.store.save(schedule.clone())?;

        info!(schedule_id = %schedule.id, status = %schedule.status, "schedule created");
        Ok(schedule)
    }

    /// Validates and saves a full replacement of schedule `id`.
    pub fn update(
        &self,
        id: &str,
        request: ScheduleRequest,
        now: NaiveDateTime,
    ) -> ScheduleResult<Schedule> {
        let _guard = self.commit.lock();
        self.update_guarded(id, request, now)
    }

    /// Moves schedule `id` to `status`, leaving every other field as is.
    ///
    /// Cancelling skips the conflict scan. Leaving `cancelled` re-occupies
    /// the room and lecturer, so the scan runs again.
    pub fn transition(
        &self,
        id: &str,
        status: ScheduleStatus,
        reason: Option<&str>,
        now: NaiveDateTime,
    ) -> ScheduleResult<Schedule> {
        let _guard = self.commit.lock();
        let existing = self.find_existing(id)?;

        let mut request = ScheduleRequest::from_schedule(&existing).with_status(status);
        request.rejection_reason = reason.map(str::to_string);
        self.update_guarded(id, request, now)
    }

    fn update_guarded(
        &self,
        id: &str,
        request: ScheduleRequest,
        now: NaiveDateTime,
    ) -> ScheduleResult<Schedule> {
        let existing = self.find_existing(id)?;

        let validated = self
            .validator()
            .validate(&request, &ValidationContext::update(now, &existing))?;
        let schedule = build_schedule(existing.id.clone(), request, validated, Some(&existing));
        self.store.save(schedule.clone())?;

        if schedule.status != existing.status {
            info!(
                schedule_id = %schedule.id,
                from = %existing.status,
                to = %schedule.status,
                "schedule status changed"
            );
        } else {
            info!(schedule_id = %schedule.id, "schedule updated");
        }
        Ok(schedule)
    }

    fn find_existing(&self, id: &str) -> ScheduleResult<Schedule> {
        self.store
            .find(id)?
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))
    }

    fn validator(&self) -> RequestValidator<&S> {
        RequestValidator::new(&self.store).with_policy(self.policy.clone())
    }
}

/// Record to persist once `request` has passed validation.
///
/// The rejection reason is kept only while the schedule stays rejected.
fn build_schedule(
    id: String,
    request: ScheduleRequest,
    validated: ValidatedRequest,
    previous: Option<&Schedule>,
) -> Schedule {
    let rejection_reason = if validated.status == ScheduleStatus::Rejected {
        request
            .rejection_reason
            .or_else(|| previous.and_then(|p| p.rejection_reason.clone()))
    } else {
        None
    };

    Schedule {
        id,
        title: request.title,
        date: request.date,
        start_time: request.start_time,
        end_time: request.end_time,
        room_id: request.room_id,
        lecturer_id: request.lecturer_id,
        course_id: request.course_id,
        class_id: request.class_id,
        status: validated.status,
        is_locked: validated.is_locked,
        expected_attendees: request.expected_attendees,
        actual_attendees: request.actual_attendees,
        rejection_reason,
    }
}
