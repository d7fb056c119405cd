//! Aggregate QA report over one agents + progress snapshot.

use chrono::{DateTime, Utc};
use fw_api_types::{OverdueAgent, QaDetails, QaReport, QaSummary, StatusCounts};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::fleet::validate_agents;
use crate::progress::validate_progress;
use crate::shape;
use crate::thresholds::Thresholds;

/// Run the full QA check over `data = { agents?, progress?, actualPosts? }`.
///
/// Always produces a report, however malformed `data` is: a missing
/// `agents` list degrades to an empty array and a missing `progress` blob
/// to an empty object before delegating to the validators. `passed` is
/// false when either validator reports hard errors or any agent is past
/// the hard overdue limit.
pub fn run_qa_check(thresholds: &Thresholds, now: DateTime<Utc>, data: &Value) -> QaReport {
    let empty_agents = Value::Array(Vec::new());
    let empty_progress = Value::Object(Map::new());
    let agents_value = shape::field(data, "agents").unwrap_or(&empty_agents);
    let progress_value = shape::field(data, "progress").unwrap_or(&empty_progress);

    let agents_result = validate_agents(thresholds, now, agents_value);
    let progress_result = validate_progress(thresholds, now, progress_value);

    let mut passed = true;
    let mut critical_errors = Vec::new();
    let mut warnings = Vec::new();

    if !agents_result.valid {
        passed = false;
        critical_errors.extend(agents_result.errors.iter().cloned());
    }
    warnings.extend(agents_result.warnings.iter().cloned());

    if !progress_result.valid {
        passed = false;
        critical_errors.extend(progress_result.errors.iter().cloned());
    }
    warnings.extend(progress_result.warnings.iter().cloned());

    let (status_counts, overdue_agents) = tally_agents(thresholds, now, agents_value);

    if !overdue_agents.is_empty() {
        critical_errors.push(format!(
            "{} agent(s) overdue by {}+ minutes",
            overdue_agents.len(),
            thresholds.overdue_hard_minutes()
        ));
        passed = false;
    }

    warnings.extend(suspicious_goal_warnings(
        thresholds,
        data,
        progress_value,
        &status_counts,
    ));

    let summary = QaSummary {
        agent_count: agents_result.agent_count,
        status_counts,
        overdue_agents,
        total_errors: critical_errors.len(),
        total_warnings: warnings.len(),
    };

    if passed {
        debug!(
            agent_count = summary.agent_count,
            warnings = summary.total_warnings,
            "QA check passed"
        );
    } else {
        warn!(
            agent_count = summary.agent_count,
            errors = summary.total_errors,
            warnings = summary.total_warnings,
            "QA check failed"
        );
    }

    QaReport {
        timestamp: now,
        passed,
        critical_errors,
        warnings,
        summary,
        details: QaDetails {
            agents: agents_result,
            progress: progress_result,
        },
    }
}

/// Tally agents into exactly one status bucket each, and collect the
/// overdue list.
///
/// Bucket precedence: error status, then hard-overdue, then "has ever
/// run" (ok), then scheduled. The overdue list is computed independently
/// of the buckets, so an error-status agent that is also overdue appears
/// in both the `error` bucket and the list.
fn tally_agents(
    thresholds: &Thresholds,
    now: DateTime<Utc>,
    agents: &Value,
) -> (StatusCounts, Vec<OverdueAgent>) {
    let mut counts = StatusCounts::default();
    let mut overdue = Vec::new();

    let Some(list) = agents.as_array() else {
        return (counts, overdue);
    };

    let now_ms = now.timestamp_millis();
    for agent in list {
        let state = shape::field(agent, "state");
        let late_ms = state
            .and_then(|s| shape::ms_field(s, "nextRunAtMs"))
            .map(|next| now_ms - next)
            .filter(|late| *late > thresholds.overdue_hard_ms);

        // Top-level status wins; lastStatus is only consulted when the
        // record carries no status of its own.
        let status = shape::str_field(agent, "status")
            .or_else(|| state.and_then(|s| shape::str_field(s, "lastStatus")));

        if status == Some("error") {
            counts.error += 1;
        } else if late_ms.is_some() {
            counts.overdue += 1;
        } else if state.map(|s| shape::present(s.get("lastRunAtMs"))).unwrap_or(false) {
            counts.ok += 1;
        } else {
            counts.scheduled += 1;
        }

        if let Some(late) = late_ms {
            overdue.push(OverdueAgent {
                name: shape::str_field(agent, "name").unwrap_or_default().to_string(),
                overdue_minutes: (late as f64 / 60_000.0).round() as i64,
            });
        }
    }

    (counts, overdue)
}

/// Best-effort plausibility checks against externally observable counts.
/// Warnings only; these never affect `passed`.
fn suspicious_goal_warnings(
    thresholds: &Thresholds,
    data: &Value,
    progress: &Value,
    status_counts: &StatusCounts,
) -> Vec<String> {
    let mut findings = Vec::new();
    let daily_goals = shape::field(progress, "dailyGoals");
    let goal_current = |key: &str| {
        daily_goals
            .and_then(|goals| shape::field(goals, key))
            .and_then(|entry| shape::number_field(entry, "current"))
    };

    let actual_posts = shape::number_field(data, "actualPosts").unwrap_or(0.0);
    if goal_current("posts") == Some(0.0) && actual_posts > 0.0 {
        findings.push(format!(
            "Suspicious: posts shows 0 but {actual_posts} posts exist"
        ));
    }

    if goal_current("engagement") == Some(0.0)
        && status_counts.ok > thresholds.active_fleet_floor as u64
    {
        findings.push("Suspicious: engagement is 0 but multiple agents are active".to_string());
    }

    findings
}
