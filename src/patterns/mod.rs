//! Rule-based pattern mining over the incident history.
//!
//! Five independent detectors scan the full incident list once each:
//! recurring causes, time-of-day clustering, priority hotspots, cascading
//! bursts and deployment correlation. Every run recomputes from scratch;
//! the caller replaces the previous pattern set wholesale.

mod detectors;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::IncidentEvent;

/// Kind of pattern a detector emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    RecurringError,
    TimeBased,
    ComponentHotspot,
    CascadingFailure,
    DeploymentCorrelation,
}

/// A detected pattern over a group of historical incidents.
///
/// `affected_components` carries the distinct issue keys of the group, not
/// component names; the stored-list consumers already depend on that
/// reading of the field, so it is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    /// Deterministic identifier derived from the detector and group key,
    /// so repeated runs over the same snapshot produce identical ids.
    pub pattern_id: String,
    pub pattern_type: PatternType,
    pub description: String,
    /// Number of incidents in the group.
    pub occurrences: usize,
    /// Earliest incident timestamp in the group, epoch ms.
    pub first_seen: i64,
    /// Latest incident timestamp in the group, epoch ms.
    pub last_seen: i64,
    /// Distinct issue keys in first-appearance order.
    pub affected_components: Vec<String>,
    /// Risk score in `[0, 100]`.
    pub risk_score: f64,
    pub recommendation: String,
    /// Issue keys of the group in detection order.
    pub related_incidents: Vec<String>,
}

/// Output of one pattern-detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    /// Detected patterns, highest risk first.
    pub patterns: Vec<Pattern>,
    /// Size of the analyzed incident list.
    pub total_incidents: usize,
    /// When the analysis ran.
    pub analysis_date: DateTime<Utc>,
}

/// Thresholds for the five detectors.
#[derive(Debug, Clone, Copy)]
pub struct MinerConfig {
    /// Below this many incidents no detection runs at all.
    pub min_incidents: usize,
    /// Minimum group size for a recurring-cause pattern.
    pub recurring_min: usize,
    /// Minimum count for an hour-of-day cluster.
    pub hourly_min: usize,
    /// Minimum group size for a priority hotspot.
    pub hotspot_min: usize,
    /// Maximum gap between consecutive incidents inside a cascade.
    pub cascade_gap_minutes: i64,
    /// Minimum run length for a cascade pattern.
    pub cascade_min: usize,
    /// Suspect-commit count from which an incident counts as
    /// deployment-linked.
    pub deployment_commit_min: u32,
    /// Minimum number of deployment-linked incidents for a pattern.
    pub deployment_min: usize,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            min_incidents: 3,
            recurring_min: 3,
            hourly_min: 3,
            hotspot_min: 5,
            cascade_gap_minutes: 15,
            cascade_min: 3,
            deployment_commit_min: 2,
            deployment_min: 3,
        }
    }
}

/// Runs the five rule-based detectors over an incident snapshot.
#[derive(Debug, Clone, Default)]
pub struct PatternMiner {
    config: MinerConfig,
}

impl PatternMiner {
    pub fn new(config: MinerConfig) -> Self {
        Self { config }
    }

    /// Detect patterns in the given incident list, stamping the report
    /// with the current time.
    pub fn detect(&self, incidents: &[IncidentEvent]) -> PatternReport {
        self.detect_at(incidents, Utc::now())
    }

    /// Deterministic variant with an explicit analysis time; `detect`
    /// delegates here.
    pub fn detect_at(&self, incidents: &[IncidentEvent], now: DateTime<Utc>) -> PatternReport {
        let mut patterns = Vec::new();

        if incidents.len() >= self.config.min_incidents {
            patterns.extend(detectors::recurring_errors(incidents, &self.config));
            patterns.extend(detectors::time_clusters(incidents, &self.config));
            patterns.extend(detectors::priority_hotspots(incidents, &self.config));
            patterns.extend(detectors::cascading_failures(incidents, &self.config));
            patterns.extend(detectors::deployment_correlation(incidents, &self.config));

            // Stable sort: ties keep detector-then-insertion order.
            patterns.sort_by(|a, b| {
                b.risk_score
                    .partial_cmp(&a.risk_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        PatternReport {
            patterns,
            total_incidents: incidents.len(),
            analysis_date: now,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::IncidentEvent;

    // 2024-01-01T00:00:00Z, a Monday.
    pub const BASE_MS: i64 = 1_704_067_200_000;
    pub const MINUTE_MS: i64 = 60_000;
    pub const HOUR_MS: i64 = 3_600_000;

    pub fn incident(key: &str, offset_ms: i64) -> IncidentEvent {
        IncidentEvent {
            issue_key: key.to_string(),
            timestamp_ms: BASE_MS + offset_ms,
            priority: "Medium".to_string(),
            recommended_action: None,
            suspect_commit_count: None,
        }
    }

    pub fn with_action(key: &str, offset_ms: i64, action: &str) -> IncidentEvent {
        IncidentEvent {
            recommended_action: Some(action.to_string()),
            ..incident(key, offset_ms)
        }
    }

    pub fn with_priority(key: &str, offset_ms: i64, priority: &str) -> IncidentEvent {
        IncidentEvent {
            priority: priority.to_string(),
            ..incident(key, offset_ms)
        }
    }

    pub fn with_commits(key: &str, offset_ms: i64, commits: u32) -> IncidentEvent {
        IncidentEvent {
            suspect_commit_count: Some(commits),
            ..incident(key, offset_ms)
        }
    }
}
