//! Storage collaborator interfaces.
//!
//! The conflict engine only reads: [`ScheduleRepository`] is everything
//! [`ConflictChecker`](crate::conflict::ConflictChecker) needs. Writing
//! lives behind [`ScheduleStore`], used by
//! [`ScheduleService`](crate::service::ScheduleService) once every check
//! has passed.

pub mod memory;

pub use memory::InMemoryScheduleStore;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Room, Schedule};

/// Errors produced by storage backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
    /// Write refused by a storage-level constraint (e.g., an exclusion
    /// constraint on overlapping bookings).
    #[error("storage constraint violated: {0}")]
    Conflict(String),
}

/// Read side of schedule storage.
///
/// Returned schedules may include cancelled ones; callers filter.
pub trait ScheduleRepository {
    /// Schedules booked in `room_id` on `date`.
    fn find_by_room_and_date(
        &self,
        room_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Schedule>, RepositoryError>;

    /// Schedules taught by `lecturer_id` on `date`.
    fn find_by_lecturer_and_date(
        &self,
        lecturer_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Schedule>, RepositoryError>;

    /// Looks up a room. `Ok(None)` if it does not exist.
    fn find_room(&self, room_id: &str) -> Result<Option<Room>, RepositoryError>;
}

/// Write side of schedule storage.
pub trait ScheduleStore: ScheduleRepository {
    /// Looks up a schedule by id.
    fn find(&self, schedule_id: &str) -> Result<Option<Schedule>, RepositoryError>;

    /// Inserts or replaces a schedule.
    fn save(&self, schedule: Schedule) -> Result<(), RepositoryError>;
}

impl<R: ScheduleRepository + ?Sized> ScheduleRepository for &R {
    fn find_by_room_and_date(
        &self,
        room_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Schedule>, RepositoryError> {
        (**self).find_by_room_and_date(room_id, date)
    }

    fn find_by_lecturer_and_date(
        &self,
        lecturer_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Schedule>, RepositoryError> {
        (**self).find_by_lecturer_and_date(lecturer_id, date)
    }

    fn find_room(&self, room_id: &str) -> Result<Option<Room>, RepositoryError> {
        (**self).find_room(room_id)
    }
}
