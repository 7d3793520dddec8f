//! Timetable domain models.
//!
//! Provides the data types exchanged between a request handler, the
//! conflict engine and the storage collaborator.
//!
//! # Domain Mappings
//!
//! | u-timetable | Academic system | Storage |
//! |-------------|-----------------|---------|
//! | Schedule | Class meeting | `schedules` row |
//! | ScheduleRequest | Create/update form | Request body |
//! | ScheduleCandidate | Slot being validated | (transient) |
//! | Room | Lecture hall / lab | `rooms` row |

mod candidate;
mod field;
mod request;
mod resource;
mod schedule;
mod status;
mod time_range;

pub use candidate::ScheduleCandidate;
pub use field::Field;
pub use request::ScheduleRequest;
pub use resource::Room;
pub use schedule::Schedule;
pub use status::{ScheduleStatus, UnknownStatus};
pub use time_range::TimeRange;
