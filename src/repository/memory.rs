//! In-memory schedule store for development, testing and embedding.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;

use super::{RepositoryError, ScheduleRepository, ScheduleStore};
use crate::models::{Room, Schedule};

/// Schedules and rooms held in process memory.
///
/// Query results are ordered by start time, then id.
#[derive(Debug, Default)]
pub struct InMemoryScheduleStore {
    schedules: RwLock<HashMap<String, Schedule>>,
    rooms: RwLock<HashMap<String, Room>>,
}

impl InMemoryScheduleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room (builder form).
    pub fn with_room(self, room: Room) -> Self {
        self.insert_room(room);
        self
    }

    /// Adds a schedule (builder form).
    pub fn with_schedule(self, schedule: Schedule) -> Self {
        self.schedules.write().insert(schedule.id.clone(), schedule);
        self
    }

    /// Inserts or replaces a room.
    pub fn insert_room(&self, room: Room) {
        self.rooms.write().insert(room.id.clone(), room);
    }

    /// Number of stored schedules.
    pub fn len(&self) -> usize {
        self.schedules.read().len()
    }

    /// Whether no schedules are stored.
    pub fn is_empty(&self) -> bool {
        self.schedules.read().is_empty()
    }

    fn select(&self, mut keep: impl FnMut(&Schedule) -> bool) -> Vec<Schedule> {
        let mut found: Vec<Schedule> = self
            .schedules
            .read()
            .values()
            .filter(|&s| keep(s))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.id.cmp(&b.id)));
        found
    }
}

impl ScheduleRepository for InMemoryScheduleStore {
    fn find_by_room_and_date(
        &self,
        room_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Schedule>, RepositoryError> {
        Ok(self.select(|s| s.date == date && s.room_id.as_deref() == Some(room_id)))
    }

    fn find_by_lecturer_and_date(
        &self,
        lecturer_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<Schedule>, RepositoryError> {
        Ok(self.select(|s| s.date == date && s.lecturer_id == lecturer_id))
    }

    fn find_room(&self, room_id: &str) -> Result<Option<Room>, RepositoryError> {
        Ok(self.rooms.read().get(room_id).cloned())
    }
}

impl ScheduleStore for InMemoryScheduleStore {
    fn find(&self, schedule_id: &str) -> Result<Option<Schedule>, RepositoryError> {
        Ok(self.schedules.read().get(schedule_id).cloned())
    }

    fn save(&self, schedule: Schedule) -> Result<(), RepositoryError> {
        if schedule.id.is_empty() {
            return Err(RepositoryError::Backend("schedule id must not be empty".into()));
        }
        self.schedules.write().insert(schedule.id.clone(), schedule);
        Ok(())
    }
}
