//! Metric samples and their calendar helpers.
//!
//! Samples arrive from the metric history store as `{timestamp, value}`
//! pairs ordered by timestamp ascending. Duplicate timestamps are allowed
//! and never deduplicated. All calendar derivation (day-of-week,
//! hour-of-day) is pinned to UTC so that grouping is deterministic across
//! environments.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 86_400_000;

/// A single observation of a named metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Observation time as epoch milliseconds.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    /// Observed value.
    pub value: f64,
}

impl Sample {
    /// Create a new sample.
    pub fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }

    /// Observation time as a UTC datetime.
    pub fn datetime(&self) -> DateTime<Utc> {
        datetime_utc(self.timestamp_ms)
    }

    /// Day of week in UTC, 0 = Monday .. 6 = Sunday.
    pub fn weekday_index(&self) -> usize {
        weekday_index(self.timestamp_ms)
    }

    /// Hour of day in UTC, 0..=23.
    pub fn hour_of_day(&self) -> u32 {
        hour_of_day(self.timestamp_ms)
    }

    /// Continuous elapsed time in days since the given epoch-ms instant.
    ///
    /// Fractional, so irregular sampling gaps are preserved.
    pub fn elapsed_days(&self, since_ms: i64) -> f64 {
        (self.timestamp_ms - since_ms) as f64 / DAY_MS as f64
    }
}

/// Convert epoch milliseconds to a UTC datetime.
///
/// Out-of-range timestamps (beyond chrono's representable span) collapse to
/// the epoch rather than panicking; retention-bounded inputs never hit this.
pub(crate) fn datetime_utc(timestamp_ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(timestamp_ms).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Day of week in UTC for an epoch-ms timestamp, 0 = Monday .. 6 = Sunday.
pub(crate) fn weekday_index(timestamp_ms: i64) -> usize {
    datetime_utc(timestamp_ms).weekday().num_days_from_monday() as usize
}

/// Hour of day in UTC for an epoch-ms timestamp.
pub(crate) fn hour_of_day(timestamp_ms: i64) -> u32 {
    datetime_utc(timestamp_ms).hour()
}

/// Extract the value column from a slice of samples.
pub fn values_of(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(|s| s.value).collect()
}
