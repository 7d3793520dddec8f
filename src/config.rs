//! Scheduling policy configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest bookable slot, in minutes.
pub const DEFAULT_MIN_DURATION_MINUTES: i64 = 15;
/// Longest bookable slot, in minutes (one 8-hour teaching day).
pub const DEFAULT_MAX_DURATION_MINUTES: i64 = 480;

/// Policy knobs applied during request validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingPolicy {
    /// Minimum slot length (inclusive).
    pub min_duration_minutes: i64,
    /// Maximum slot length (inclusive).
    pub max_duration_minutes: i64,
    /// Refuse new schedules dated before today.
    pub reject_past_dates: bool,
}

/// Invalid policy values.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Input was not valid JSON for a policy.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Minimum duration must be positive.
    #[error("min_duration_minutes must be greater than 0")]
    NonPositiveMinimum,
    /// Minimum is above maximum.
    #[error("min_duration_minutes ({min}) exceeds max_duration_minutes ({max})")]
    InvertedBounds { min: i64, max: i64 },
    /// Maximum does not fit in one day.
    #[error("max_duration_minutes ({0}) exceeds one day")]
    ExceedsDay(i64),
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            min_duration_minutes: DEFAULT_MIN_DURATION_MINUTES,
            max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
            reject_past_dates: true,
        }
    }
}

impl SchedulingPolicy {
    /// Sets the allowed duration range, in minutes.
    pub fn with_duration_bounds(mut self, min: i64, max: i64) -> Self {
        self.min_duration_minutes = min;
        self.max_duration_minutes = max;
        self
    }

    /// Allows or refuses past dates on create.
    pub fn with_past_dates(mut self, allowed: bool) -> Self {
        self.reject_past_dates = !allowed;
        self
    }

    /// Whether a slot of `minutes` is within bounds.
    #[inline]
    pub fn admits_duration(&self, minutes: i64) -> bool {
        (self.min_duration_minutes..=self.max_duration_minutes).contains(&minutes)
    }

    /// Validate policy values.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.min_duration_minutes <= 0 {
            return Err(PolicyError::NonPositiveMinimum);
        }
        if self.min_duration_minutes > self.max_duration_minutes {
            return Err(PolicyError::InvertedBounds {
                min: self.min_duration_minutes,
                max: self.max_duration_minutes,
            });
        }
        if self.max_duration_minutes > 24 * 60 {
            return Err(PolicyError::ExceedsDay(self.max_duration_minutes));
        }
        Ok(())
    }

    /// Parse a policy from a JSON string and validate.
    ///
    /// Missing keys take their default values.
    pub fn from_json_str(input: &str) -> Result<Self, PolicyError> {
        let policy: SchedulingPolicy = serde_json::from_str(input)?;
        policy.validate()?;
        Ok(policy)
    }
}
