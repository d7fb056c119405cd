//! Progress-record validation.

use chrono::{DateTime, Utc};
use fw_api_types::ValidationOutcome;
use serde_json::Value;

use crate::goals::validate_daily_goals;
use crate::shape;
use crate::thresholds::Thresholds;

/// Counter sub-objects under `progress.goals` whose `current` must be
/// numeric when present.
const GOAL_COUNTER_KEYS: [&str; 2] = ["xFollowers", "youtubeSubs"];

/// Validate the progress blob.
///
/// Staleness and absence of `lastUpdated` or `dailyGoals` are warnings;
/// the only hard errors are non-object input, non-numeric follower
/// counters, and whatever [`validate_daily_goals`] reports. Safe against
/// nulls at any nesting depth.
pub fn validate_progress(
    thresholds: &Thresholds,
    now: DateTime<Utc>,
    progress: &Value,
) -> ValidationOutcome {
    if !progress.is_object() {
        return ValidationOutcome::failure("Progress must be an object");
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match shape::field(progress, "lastUpdated") {
        None => warnings.push("Progress has no lastUpdated timestamp".to_string()),
        Some(value) => {
            // Unparseable timestamps are left alone; staleness is advisory.
            if let Some(updated_ms) = parse_timestamp_ms(value) {
                let age_ms = now.timestamp_millis() - updated_ms;
                if age_ms > thresholds.stale_progress_ms {
                    let minutes = (age_ms as f64 / 60_000.0).round() as i64;
                    warnings.push(format!("Progress last updated {minutes} minutes ago"));
                }
            }
        }
    }

    if let Some(goal_counters) = shape::field(progress, "goals") {
        for key in GOAL_COUNTER_KEYS {
            if let Some(counter) = shape::field(goal_counters, key) {
                if shape::number_field(counter, "current").is_none() {
                    errors.push(format!("goals.{key}.current must be a number"));
                }
            }
        }
    }

    match shape::field(progress, "dailyGoals") {
        Some(daily_goals) => {
            let outcome = validate_daily_goals(thresholds, daily_goals);
            errors.extend(outcome.errors);
            warnings.extend(outcome.warnings);
        }
        None => warnings.push("Progress missing dailyGoals".to_string()),
    }

    ValidationOutcome::from_findings(errors, warnings)
}

/// Read `lastUpdated` as epoch milliseconds: RFC 3339 strings or raw
/// numeric timestamps.
fn parse_timestamp_ms(value: &Value) -> Option<i64> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.timestamp_millis()),
        other => shape::as_finite_number(other).map(|n| n as i64),
    }
}
