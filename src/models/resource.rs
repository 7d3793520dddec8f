//! Room model.
//!
//! Rooms are the bookable spaces a schedule may occupy. Lecturers are the
//! other contended resource, but only their identifier matters to the
//! conflict engine, so they have no model of their own here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name (e.g., "GHC 4102").
    pub name: String,
    /// Seats available. `None` = unknown, which disables the capacity guard.
    pub capacity: Option<u32>,
    /// Domain-specific metadata (building, floor, equipment).
    pub attributes: HashMap<String, String>,
}

impl Room {
    /// Creates a room with unknown capacity.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the seat capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether `attendees` people fit in this room.
    ///
    /// Always `true` when the capacity is unknown.
    pub fn admits(&self, attendees: u32) -> bool {
        self.capacity.map_or(true, |cap| attendees <= cap)
    }
}
