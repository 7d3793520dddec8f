//! Error types for schedule operations.

use thiserror::Error;

use crate::repository::RepositoryError;
use crate::validation::ValidationError;

/// Errors produced by request validation and the schedule service.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The request was refused; one entry per failed check.
    #[error("schedule request rejected with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),
    /// No schedule with this id.
    #[error("schedule {0} not found")]
    NotFound(String),
    /// Storage failure. Not a validation outcome.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ScheduleError {
    /// Validation failures, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            ScheduleError::Validation(errors) => Some(errors.as_slice()),
            _ => None,
        }
    }
}

/// Result alias for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
