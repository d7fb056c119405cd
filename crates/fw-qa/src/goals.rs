//! Daily-goal validation.

use fw_api_types::ValidationOutcome;
use serde_json::Value;

use crate::shape;
use crate::thresholds::{Thresholds, DAILY_GOAL_KEYS};

/// Validate the `dailyGoals` object.
///
/// Each of the six tracked keys must hold a `{current, target}` pair with
/// a non-negative numeric `current`. A missing key is only a warning, as
/// is a `current` more than `suspicious_goal_multiplier` times its
/// target. Keys outside the tracked set are ignored.
pub fn validate_daily_goals(thresholds: &Thresholds, goals: &Value) -> ValidationOutcome {
    if !goals.is_object() {
        return ValidationOutcome::failure("dailyGoals must be an object");
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for key in DAILY_GOAL_KEYS {
        let Some(entry) = shape::field(goals, key) else {
            warnings.push(format!("Missing dailyGoal key: {key}"));
            continue;
        };

        match shape::number_field(entry, "current") {
            None => errors.push(format!("dailyGoals.{key}.current must be a number")),
            Some(current) => {
                if current < 0.0 {
                    errors.push(format!("dailyGoals.{key}.current cannot be negative"));
                }
                if let Some(target) = shape::number_field(entry, "target") {
                    // A zero target never trips the magnitude check, so
                    // {current: 0, target: 0} stays clean.
                    if target != 0.0 && current > target * thresholds.suspicious_goal_multiplier {
                        warnings.push(format!(
                            "dailyGoals.{key}.current ({current}) seems unusually high"
                        ));
                    }
                }
            }
        }
    }

    ValidationOutcome::from_findings(errors, warnings)
}
