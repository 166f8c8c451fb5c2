//! Historical incident records consumed by the pattern miner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::sample;

/// An immutable historical incident, appended by the external analysis
/// pipeline and read back from the stored incident list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentEvent {
    /// Tracker key of the incident ticket, e.g. `OPS-1432`.
    pub issue_key: String,
    /// Creation time as epoch milliseconds.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    /// Priority label as recorded by the tracker, e.g. `Highest`.
    pub priority: String,
    /// Recommended action produced by the diagnosis step, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_action: Option<String>,
    /// Number of suspect commits linked during analysis, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspect_commit_count: Option<u32>,
}

impl IncidentEvent {
    /// Creation time as a UTC datetime.
    pub fn datetime(&self) -> DateTime<Utc> {
        sample::datetime_utc(self.timestamp_ms)
    }

    /// Hour of day in UTC, 0..=23.
    pub fn hour_of_day(&self) -> u32 {
        sample::hour_of_day(self.timestamp_ms)
    }

    /// Recommended action, falling back to `"Unknown"` when the diagnosis
    /// step produced none.
    pub fn action_or_unknown(&self) -> &str {
        self.recommended_action.as_deref().unwrap_or("Unknown")
    }
}
