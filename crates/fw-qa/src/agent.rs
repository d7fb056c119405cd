//! Single-agent record validation.

use chrono::{DateTime, Utc};
use fw_api_types::{AgentStatus, ValidationOutcome};
use serde_json::Value;

use crate::shape;
use crate::thresholds::{Thresholds, AGENT_REQUIRED_FIELDS, STATE_REQUIRED_FIELDS};

/// Validate one agent record.
///
/// Total over any JSON value: non-object input yields a failed outcome,
/// never a panic. Hard errors are missing `id`/`name`, a malformed id,
/// and a run more than `overdue_hard_ms` past its schedule; all `state`
/// telemetry checks are advisory warnings.
pub fn validate_agent(thresholds: &Thresholds, now: DateTime<Utc>, agent: &Value) -> ValidationOutcome {
    if !agent.is_object() {
        return ValidationOutcome::failure("Agent must be an object");
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let label = agent_label(agent);

    for field in AGENT_REQUIRED_FIELDS {
        if !shape::present(agent.get(field)) {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    if let Some(id) = shape::field(agent, "id") {
        let well_formed = id
            .as_str()
            .map(|s| s.chars().count() >= thresholds.min_id_length)
            .unwrap_or(false);
        if !well_formed {
            errors.push(format!(
                "Invalid ID format: {} (must be string, {}+ chars)",
                shape::display(id),
                thresholds.min_id_length
            ));
        }
    }

    match shape::field(agent, "state") {
        None => warnings.push(format!("Agent {label}: Missing state object")),
        Some(state) => check_state(thresholds, now, state, &label, &mut errors, &mut warnings),
    }

    if let Some(status) = shape::field(agent, "status") {
        let known = status
            .as_str()
            .map(|s| AgentStatus::parse(s).is_some())
            .unwrap_or(false);
        if !known {
            warnings.push(format!(
                "Agent {label}: Unknown status \"{}\"",
                shape::display(status)
            ));
        }
    }

    ValidationOutcome::from_findings(errors, warnings)
}

/// Telemetry checks for the `state` sub-record.
fn check_state(
    thresholds: &Thresholds,
    now: DateTime<Utc>,
    state: &Value,
    label: &str,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    for field in STATE_REQUIRED_FIELDS {
        if shape::present(state.get(field)) {
            continue;
        }
        // An agent that never ran has no duration to record.
        if field == "lastDurationMs" && !shape::present(state.get("lastRunAtMs")) {
            continue;
        }
        warnings.push(format!("Agent {label}: Missing state.{field}"));
    }

    let now_ms = now.timestamp_millis();
    let window_ms = thresholds.plausible_window_ms();

    if let Some(ts) = shape::ms_field(state, "lastRunAtMs") {
        if ts < now_ms - window_ms || ts > now_ms {
            warnings.push(format!("Agent {label}: lastRunAtMs looks invalid ({ts})"));
        }
    }

    if let Some(ts) = shape::ms_field(state, "nextRunAtMs") {
        if ts < now_ms - window_ms || ts > now_ms + window_ms {
            warnings.push(format!("Agent {label}: nextRunAtMs looks invalid ({ts})"));
        }

        // Boundary is compared in milliseconds; minutes are rounded for
        // display only.
        let late_ms = now_ms - ts;
        if late_ms > 0 {
            let minutes = (late_ms as f64 / 60_000.0).round() as i64;
            if late_ms > thresholds.overdue_hard_ms {
                errors.push(format!("Agent {label}: OVERDUE by {minutes} minutes"));
            } else {
                warnings.push(format!("Agent {label}: Overdue by {minutes} minutes"));
            }
        }
    }

    if let Some(duration_ms) = shape::ms_field(state, "lastDurationMs") {
        if duration_ms > thresholds.long_run_ms {
            let seconds = (duration_ms as f64 / 1000.0).round() as i64;
            warnings.push(format!("Agent {label}: Duration unusually long ({seconds}s)"));
        }
    }
}

/// Display label for findings: `name`, falling back to `id`.
fn agent_label(agent: &Value) -> String {
    shape::str_field(agent, "name")
        .or_else(|| shape::str_field(agent, "id"))
        .unwrap_or("unknown")
        .to_string()
}
