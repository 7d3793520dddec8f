//! Room and lecturer double-booking detection.
//!
//! # Algorithm
//!
//! 1. Fetch the room's schedules on the candidate date (only if a room is
//!    requested) and the lecturer's schedules on that date.
//! 2. Drop cancelled schedules and the schedule being updated.
//! 3. Report every remaining schedule whose time range overlaps the
//!    candidate's under half-open semantics: `[s1,e1)` and `[s2,e2)`
//!    conflict iff `s1 < e2 && s2 < e1`.
//!
//! Room and lecturer checks are independent; a candidate may conflict on
//! both at once.
//!
//! # Guards
//!
//! Two policy checks gate the same request and live alongside the overlap
//! scan: slot length must be within the configured bounds, and the planned
//! head count must fit the room.
//!
//! # Complexity
//! O(r + l) where r, l = schedules of the room and lecturer on that date.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::SchedulingPolicy;
use crate::models::{Schedule, ScheduleCandidate};
use crate::repository::{RepositoryError, ScheduleRepository};

/// Outcome of an overlap scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictResult {
    /// The room is already booked for an overlapping range.
    pub room_conflict: bool,
    /// The lecturer is already teaching during an overlapping range.
    pub lecturer_conflict: bool,
    /// Ids of the overlapping schedules, room hits first, without duplicates.
    pub conflicting_schedule_ids: Vec<String>,
}

impl ConflictResult {
    /// Whether any resource is double-booked.
    #[inline]
    pub fn has_conflict(&self) -> bool {
        self.room_conflict || self.lecturer_conflict
    }

    fn record(&mut self, schedule: &Schedule) {
        if !self.conflicting_schedule_ids.contains(&schedule.id) {
            self.conflicting_schedule_ids.push(schedule.id.clone());
        }
    }
}

/// A policy check that failed before (or besides) the overlap scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardViolation {
    /// Slot too short or too long.
    #[error("duration of {minutes} minutes is outside the allowed {min}-{max} minutes")]
    DurationOutOfRange { minutes: i64, min: i64, max: i64 },
    /// More attendees than seats.
    #[error("{attendees} expected attendees exceed the capacity of room {room_id} ({capacity})")]
    CapacityExceeded {
        room_id: String,
        attendees: u32,
        capacity: u32,
    },
    /// The requested room does not exist.
    #[error("room {room_id} does not exist")]
    UnknownRoom { room_id: String },
}

/// Schedules in `existing` that `candidate` would collide with.
///
/// Pure form of the overlap scan: skips cancelled schedules, the excluded
/// schedule, and schedules on other dates.
pub fn find_overlaps<'a>(
    candidate: &'a ScheduleCandidate,
    existing: &'a [Schedule],
) -> impl Iterator<Item = &'a Schedule> + 'a {
    let range = candidate.time_range();
    existing
        .iter()
        .filter(move |s| !candidate.is_excluded(&s.id) && s.occupies(candidate.date, &range))
}

/// Detects double-booking of rooms and lecturers.
///
/// Read-only: never writes to the repository.
///
/// # Example
///
/// ```
/// use u_timetable::conflict::ConflictChecker;
/// use u_timetable::models::{Schedule, ScheduleCandidate, ScheduleStatus};
/// use u_timetable::repository::InMemoryScheduleStore;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// let store = InMemoryScheduleStore::new().with_schedule(
///     Schedule::new("S1", date, at(9, 0), at(10, 30), "L1")
///         .with_room("R1")
///         .with_status(ScheduleStatus::Approved),
/// );
/// let checker = ConflictChecker::new(&store);
///
/// let overlapping = ScheduleCandidate::new(date, at(10, 0), at(11, 0), "L2").with_room("R1");
/// assert!(checker.check_conflicts(&overlapping).unwrap().room_conflict);
///
/// let touching = ScheduleCandidate::new(date, at(10, 30), at(11, 30), "L2").with_room("R1");
/// assert!(!checker.check_conflicts(&touching).unwrap().room_conflict);
/// ```
#[derive(Debug, Clone)]
pub struct ConflictChecker<R> {
    repository: R,
    policy: SchedulingPolicy,
}

impl<R: ScheduleRepository> ConflictChecker<R> {
    /// Creates a checker with the default policy.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            policy: SchedulingPolicy::default(),
        }
    }

    /// Sets the policy used by the guards.
    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Policy used by the guards.
    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Scans stored schedules for room and lecturer overlaps.
    ///
    /// Expects a well-formed time range; malformed input is rejected by
    /// the caller before this point.
    pub fn check_conflicts(
        &self,
        candidate: &ScheduleCandidate,
    ) -> Result<ConflictResult, RepositoryError> {
        let mut result = ConflictResult::default();

        if let Some(room_id) = candidate.room_id.as_deref() {
            let booked = self.repository.find_by_room_and_date(room_id, candidate.date)?;
            for s in find_overlaps(candidate, &booked) {
                debug!(room_id, schedule_id = %s.id, "room already booked");
                result.room_conflict = true;
                result.record(s);
            }
        }

        let teaching = self
            .repository
            .find_by_lecturer_and_date(&candidate.lecturer_id, candidate.date)?;
        for s in find_overlaps(candidate, &teaching) {
            debug!(lecturer_id = %candidate.lecturer_id, schedule_id = %s.id, "lecturer already booked");
            result.lecturer_conflict = true;
            result.record(s);
        }

        Ok(result)
    }

    /// Checks the slot length against the policy bounds.
    ///
    /// Returns `None` if the duration is acceptable.
    pub fn check_duration(&self, candidate: &ScheduleCandidate) -> Option<GuardViolation> {
        let minutes = candidate.time_range().duration_minutes();
        if self.policy.admits_duration(minutes) {
            None
        } else {
            Some(GuardViolation::DurationOutOfRange {
                minutes,
                min: self.policy.min_duration_minutes,
                max: self.policy.max_duration_minutes,
            })
        }
    }

    /// Checks that the requested room exists and seats the planned head count.
    ///
    /// Returns `Ok(None)` when there is no room, no head count, or no known
    /// capacity to compare against.
    pub fn check_capacity(
        &self,
        candidate: &ScheduleCandidate,
    ) -> Result<Option<GuardViolation>, RepositoryError> {
        let Some(room_id) = candidate.room_id.as_deref() else {
            return Ok(None);
        };
        let Some(room) = self.repository.find_room(room_id)? else {
            return Ok(Some(GuardViolation::UnknownRoom {
                room_id: room_id.to_string(),
            }));
        };

        match (candidate.expected_attendees, room.capacity) {
            (Some(attendees), Some(capacity)) if !room.admits(attendees) => {
                Ok(Some(GuardViolation::CapacityExceeded {
                    room_id: room.id,
                    attendees,
                    capacity,
                }))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{at, day};
    use crate::models::{Room, ScheduleStatus};
    use crate::repository::InMemoryScheduleStore;

    fn existing(id: &str, room: &str, lecturer: &str, status: ScheduleStatus) -> Schedule {
        Schedule::new(id, day(2025, 3, 10), at(9, 0), at(10, 30), lecturer)
            .with_room(room)
            .with_status(status)
    }

    fn store_with(schedules: Vec<Schedule>) -> InMemoryScheduleStore {
        schedules.into_iter().fold(
            InMemoryScheduleStore::new().with_room(Room::new("R1").with_capacity(40)),
            |store, s| store.with_schedule(s),
        )
    }

    fn candidate(start: (u32, u32), end: (u32, u32)) -> ScheduleCandidate {
        ScheduleCandidate::new(day(2025, 3, 10), at(start.0, start.1), at(end.0, end.1), "L2")
            .with_room("R1")
    }

    #[test]
    fn test_room_overlap() {
        let store = store_with(vec![existing("S1", "R1", "L1", ScheduleStatus::Approved)]);
        let checker = ConflictChecker::new(&store);

        let result = checker.check_conflicts(&candidate((10, 0), (11, 0))).unwrap();
        assert!(result.room_conflict);
        assert!(!result.lecturer_conflict);
        assert_eq!(result.conflicting_schedule_ids, vec!["S1".to_string()]);
    }

    #[test]
    fn test_touching_boundary_is_free() {
        let store = store_with(vec![existing("S1", "R1", "L1", ScheduleStatus::Approved)]);
        let checker = ConflictChecker::new(&store);

        let after = checker.check_conflicts(&candidate((10, 30), (11, 30))).unwrap();
        assert!(!after.has_conflict());

        let before = checker.check_conflicts(&candidate((8, 0), (9, 0))).unwrap();
        assert!(!before.has_conflict());
        assert!(before.conflicting_schedule_ids.is_empty());
    }

    #[test]
    fn test_lecturer_overlap_in_other_room() {
        let store = store_with(vec![existing("S1", "R7", "L2", ScheduleStatus::Submitted)]);
        let checker = ConflictChecker::new(&store);

        let result = checker.check_conflicts(&candidate((9, 30), (10, 0))).unwrap();
        assert!(!result.room_conflict);
        assert!(result.lecturer_conflict);
    }

    #[test]
    fn test_room_and_lecturer_reported_together() {
        let store = store_with(vec![
            existing("S1", "R1", "L1", ScheduleStatus::Approved),
            existing("S2", "R7", "L2", ScheduleStatus::Draft),
        ]);
        let checker = ConflictChecker::new(&store);

        let result = checker.check_conflicts(&candidate((10, 0), (11, 0))).unwrap();
        assert!(result.room_conflict);
        assert!(result.lecturer_conflict);
        assert_eq!(
            result.conflicting_schedule_ids,
            vec!["S1".to_string(), "S2".to_string()]
        );
    }

    #[test]
    fn test_same_schedule_listed_once() {
        // Same room and same lecturer: one schedule, two conflicts.
        let store = store_with(vec![existing("S1", "R1", "L2", ScheduleStatus::Approved)]);
        let checker = ConflictChecker::new(&store);

        let result = checker.check_conflicts(&candidate((10, 0), (11, 0))).unwrap();
        assert!(result.room_conflict && result.lecturer_conflict);
        assert_eq!(result.conflicting_schedule_ids, vec!["S1".to_string()]);
    }

    #[test]
    fn test_cancelled_never_conflicts() {
        let store = store_with(vec![
            existing("S1", "R1", "L1", ScheduleStatus::Cancelled),
            existing("S2", "R7", "L2", ScheduleStatus::Cancelled),
        ]);
        let checker = ConflictChecker::new(&store);

        for (start, end) in [((9, 0), (10, 30)), ((8, 0), (12, 0)), ((9, 15), (9, 45))] {
            let result = checker.check_conflicts(&candidate(start, end)).unwrap();
            assert_eq!(result, ConflictResult::default());
        }
    }

    #[test]
    fn test_non_cancelled_statuses_all_block() {
        for status in ScheduleStatus::ALL {
            let store = store_with(vec![existing("S1", "R1", "L1", status)]);
            let checker = ConflictChecker::new(&store);
            let result = checker.check_conflicts(&candidate((9, 0), (10, 30))).unwrap();
            assert_eq!(result.room_conflict, status.blocks_resources(), "{status}");
        }
    }

    #[test]
    fn test_excluded_schedule_ignores_itself() {
        let store = store_with(vec![existing("S1", "R1", "L2", ScheduleStatus::Approved)]);
        let checker = ConflictChecker::new(&store);

        let unchanged = candidate((9, 0), (10, 30)).excluding("S1");
        assert!(!checker.check_conflicts(&unchanged).unwrap().has_conflict());

        let shifted = candidate((9, 30), (11, 0)).excluding("S1");
        assert!(!checker.check_conflicts(&shifted).unwrap().has_conflict());

        let not_excluded = candidate((9, 0), (10, 30)).excluding("S9");
        assert!(checker.check_conflicts(&not_excluded).unwrap().has_conflict());
    }

    #[test]
    fn test_no_room_skips_room_check() {
        let store = store_with(vec![existing("S1", "R1", "L1", ScheduleStatus::Approved)]);
        let checker = ConflictChecker::new(&store);

        let roomless = ScheduleCandidate::new(day(2025, 3, 10), at(9, 0), at(10, 0), "L2");
        assert!(!checker.check_conflicts(&roomless).unwrap().has_conflict());
    }

    #[test]
    fn test_other_date_is_free() {
        let store = store_with(vec![existing("S1", "R1", "L2", ScheduleStatus::Approved)]);
        let checker = ConflictChecker::new(&store);

        let mut next_day = candidate((9, 0), (10, 30));
        next_day.date = day(2025, 3, 11);
        assert!(!checker.check_conflicts(&next_day).unwrap().has_conflict());
    }

    #[test]
    fn test_find_overlaps_pure() {
        let schedules = vec![
            existing("S1", "R1", "L1", ScheduleStatus::Approved),
            existing("S2", "R1", "L1", ScheduleStatus::Cancelled),
            existing("S3", "R1", "L1", ScheduleStatus::Draft),
        ];
        let c = candidate((10, 0), (11, 0)).excluding("S3");
        let ids: Vec<_> = find_overlaps(&c, &schedules).map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S1"]);
    }

    #[test]
    fn test_duration_guard() {
        let store = store_with(vec![]);
        let checker = ConflictChecker::new(&store);

        let short = candidate((9, 0), (9, 10));
        assert_eq!(
            checker.check_duration(&short),
            Some(GuardViolation::DurationOutOfRange {
                minutes: 10,
                min: 15,
                max: 480
            })
        );

        let long = candidate((8, 0), (16, 20));
        assert!(matches!(
            checker.check_duration(&long),
            Some(GuardViolation::DurationOutOfRange { minutes: 500, .. })
        ));

        assert_eq!(checker.check_duration(&candidate((9, 0), (9, 15))), None);
        assert_eq!(checker.check_duration(&candidate((8, 0), (16, 0))), None);
    }

    #[test]
    fn test_duration_guard_uses_policy() {
        let store = store_with(vec![]);
        let checker = ConflictChecker::new(&store)
            .with_policy(SchedulingPolicy::default().with_duration_bounds(50, 100));

        assert!(checker.check_duration(&candidate((9, 0), (9, 45))).is_some());
        assert!(checker.check_duration(&candidate((9, 0), (10, 40))).is_none());
    }

    #[test]
    fn test_capacity_guard() {
        let store = store_with(vec![]).with_room(Room::new("R2"));
        let checker = ConflictChecker::new(&store);

        let crowded = candidate((9, 0), (10, 0)).with_expected_attendees(41);
        assert_eq!(
            checker.check_capacity(&crowded).unwrap(),
            Some(GuardViolation::CapacityExceeded {
                room_id: "R1".into(),
                attendees: 41,
                capacity: 40
            })
        );

        let full = candidate((9, 0), (10, 0)).with_expected_attendees(40);
        assert_eq!(checker.check_capacity(&full).unwrap(), None);

        let unknown_capacity = ScheduleCandidate::new(day(2025, 3, 10), at(9, 0), at(10, 0), "L2")
            .with_room("R2")
            .with_expected_attendees(500);
        assert_eq!(checker.check_capacity(&unknown_capacity).unwrap(), None);

        let no_head_count = candidate((9, 0), (10, 0));
        assert_eq!(checker.check_capacity(&no_head_count).unwrap(), None);
    }

    #[test]
    fn test_capacity_guard_unknown_room() {
        let store = store_with(vec![]);
        let checker = ConflictChecker::new(&store);

        let c = ScheduleCandidate::new(day(2025, 3, 10), at(9, 0), at(10, 0), "L2").with_room("R404");
        assert_eq!(
            checker.check_capacity(&c).unwrap(),
            Some(GuardViolation::UnknownRoom {
                room_id: "R404".into()
            })
        );
    }

    #[test]
    fn test_repository_errors_propagate() {
        struct Offline;
        impl ScheduleRepository for Offline {
            fn find_by_room_and_date(
                &self,
                _: &str,
                _: chrono::NaiveDate,
            ) -> Result<Vec<Schedule>, RepositoryError> {
                Err(RepositoryError::Backend("connection refused".into()))
            }
            fn find_by_lecturer_and_date(
                &self,
                _: &str,
                _: chrono::NaiveDate,
            ) -> Result<Vec<Schedule>, RepositoryError> {
                Ok(Vec::new())
            }
            fn find_room(&self, _: &str) -> Result<Option<Room>, RepositoryError> {
                Err(RepositoryError::Backend("connection refused".into()))
            }
        }

        let checker = ConflictChecker::new(Offline);
        let c = candidate((9, 0), (10, 0));
        assert!(checker.check_conflicts(&c).is_err());
        assert!(checker.check_capacity(&c).is_err());
    }
}
