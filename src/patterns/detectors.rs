//! The five rule-based pattern detectors.
//!
//! Each detector scans the full incident list once and emits zero or more
//! patterns. Group iteration preserves first-appearance order so that the
//! miner's stable sort keeps detector-then-insertion order on equal risk.

use std::collections::HashMap;

use crate::core::IncidentEvent;
use crate::patterns::{MinerConfig, Pattern, PatternType};

/// Hours on the clock face.
const HOURS: usize = 24;

/// Group incidents by a string key, keys in first-appearance order.
fn group_in_order<'a, F>(
    incidents: &'a [IncidentEvent],
    key_of: F,
) -> Vec<(String, Vec<&'a IncidentEvent>)>
where
    F: Fn(&IncidentEvent) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&IncidentEvent>)> = Vec::new();

    for incident in incidents {
        let key = key_of(incident);
        match index.get(&key) {
            Some(&i) => groups[i].1.push(incident),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![incident]));
            }
        }
    }

    groups
}

/// Lowercase a group key into an id-safe slug.
fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_dash = true;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_end_matches('-').to_string()
}

/// Assemble a pattern record from a detected group.
fn build_pattern(
    pattern_id: String,
    pattern_type: PatternType,
    description: String,
    recommendation: String,
    risk_score: f64,
    members: &[&IncidentEvent],
) -> Pattern {
    let first_seen = members.iter().map(|i| i.timestamp_ms).min().unwrap_or(0);
    let last_seen = members.iter().map(|i| i.timestamp_ms).max().unwrap_or(0);

    // Distinct issue keys, first appearance wins.
    let mut affected_components = Vec::new();
    for member in members {
        if !affected_components.contains(&member.issue_key) {
            affected_components.push(member.issue_key.clone());
        }
    }

    Pattern {
        pattern_id,
        pattern_type,
        description,
        occurrences: members.len(),
        first_seen,
        last_seen,
        affected_components,
        risk_score,
        recommendation,
        related_incidents: members.iter().map(|i| i.issue_key.clone()).collect(),
    }
}

/// Incidents sharing a recommended action point at one unresolved root
/// cause.
pub(super) fn recurring_errors(
    incidents: &[IncidentEvent],
    config: &MinerConfig,
) -> Vec<Pattern> {
    group_in_order(incidents, |i| i.action_or_unknown().to_string())
        .into_iter()
        .filter(|(_, members)| members.len() >= config.recurring_min)
        .map(|(action, members)| {
            let count = members.len();
            build_pattern(
                format!("recurring-error:{}", slug(&action)),
                PatternType::RecurringError,
                format!("{count} incidents share the recommended action \"{action}\""),
                format!(
                    "Automate remediation for \"{action}\" or fix its root cause permanently"
                ),
                (40.0 + 10.0 * count as f64).min(95.0),
                &members,
            )
        })
        .collect()
}

/// Hours of the day attracting a disproportionate share of incidents.
pub(super) fn time_clusters(incidents: &[IncidentEvent], config: &MinerConfig) -> Vec<Pattern> {
    let mut by_hour: Vec<Vec<&IncidentEvent>> = vec![Vec::new(); HOURS];
    for incident in incidents {
        by_hour[incident.hour_of_day() as usize].push(incident);
    }

    let expected_per_hour = incidents.len() as f64 / HOURS as f64;

    by_hour
        .iter()
        .enumerate()
        .filter(|(_, members)| {
            members.len() >= config.hourly_min
                && members.len() as f64 > 2.0 * expected_per_hour
        })
        .map(|(hour, members)| {
            let count = members.len();
            build_pattern(
                format!("time-based:{hour:02}"),
                PatternType::TimeBased,
                format!("{count} incidents cluster between {hour:02}:00 and {hour:02}:59 UTC"),
                format!("Review scheduled jobs and load peaks around {hour:02}:00 UTC"),
                (30.0 + 5.0 * count as f64).min(80.0),
                members,
            )
        })
        .collect()
}

/// Persistent accumulation of top-priority incidents.
pub(super) fn priority_hotspots(
    incidents: &[IncidentEvent],
    config: &MinerConfig,
) -> Vec<Pattern> {
    ["Highest", "High"]
        .iter()
        .filter_map(|&priority| {
            let members: Vec<&IncidentEvent> = incidents
                .iter()
                .filter(|i| i.priority == priority)
                .collect();
            if members.len() < config.hotspot_min {
                return None;
            }
            let count = members.len();
            Some(build_pattern(
                format!("component-hotspot:{}", slug(priority)),
                PatternType::ComponentHotspot,
                format!("{count} {priority}-priority incidents indicate a persistent hotspot"),
                format!("Prioritize stability work where {priority}-priority incidents recur"),
                (50.0 + 8.0 * count as f64).min(100.0),
                &members,
            ))
        })
        .collect()
}

/// Tight bursts of incidents suggest one failure cascading through
/// coupled services.
pub(super) fn cascading_failures(
    incidents: &[IncidentEvent],
    config: &MinerConfig,
) -> Vec<Pattern> {
    let mut ordered: Vec<&IncidentEvent> = incidents.iter().collect();
    ordered.sort_by_key(|i| i.timestamp_ms);

    let gap_ms = config.cascade_gap_minutes * 60_000;
    let mut patterns = Vec::new();
    let mut run: Vec<&IncidentEvent> = Vec::new();

    for incident in ordered {
        let breaks_run = run
            .last()
            .map(|prev| incident.timestamp_ms - prev.timestamp_ms > gap_ms)
            .unwrap_or(false);
        if breaks_run {
            flush_cascade_run(&mut run, config, &mut patterns);
        }
        run.push(incident);
    }
    flush_cascade_run(&mut run, config, &mut patterns);

    patterns
}

/// Emit the accumulated run as a pattern if it is long enough, then reset.
fn flush_cascade_run(
    run: &mut Vec<&IncidentEvent>,
    config: &MinerConfig,
    patterns: &mut Vec<Pattern>,
) {
    if run.len() >= config.cascade_min {
        let count = run.len();
        patterns.push(build_pattern(
            format!("cascading-failure:{}", run[0].timestamp_ms),
            PatternType::CascadingFailure,
            format!(
                "{count} incidents within {} minutes of each other starting at {}",
                config.cascade_gap_minutes,
                run[0].datetime().to_rfc3339(),
            ),
            "Investigate shared dependencies and add circuit breakers between coupled services"
                .to_string(),
            (60.0 + 10.0 * count as f64).min(100.0),
            run,
        ));
    }
    run.clear();
}

/// Incidents repeatedly linked to multiple suspect commits correlate with
/// deployments.
pub(super) fn deployment_correlation(
    incidents: &[IncidentEvent],
    config: &MinerConfig,
) -> Vec<Pattern> {
    let members: Vec<&IncidentEvent> = incidents
        .iter()
        .filter(|i| i.suspect_commit_count.unwrap_or(0) >= config.deployment_commit_min)
        .collect();

    if members.len() < config.deployment_min {
        return Vec::new();
    }

    let count = members.len();
    vec![build_pattern(
        "deployment-correlation".to_string(),
        PatternType::DeploymentCorrelation,
        format!(
            "{count} incidents each link {} or more suspect commits",
            config.deployment_commit_min
        ),
        "Tighten deploy verification and enable automatic rollback on failed health checks"
            .to_string(),
        (45.0 + 7.0 * count as f64).min(90.0),
        &members,
    )]
}
