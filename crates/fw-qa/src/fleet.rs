//! Agent-collection validation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use fw_api_types::FleetValidation;
use serde_json::Value;
use tracing::debug;

use crate::agent::validate_agent;
use crate::shape;
use crate::thresholds::Thresholds;

/// Validate the whole agent collection.
///
/// Hard errors: non-array input, an empty collection, and duplicate ids
/// (one aggregate message regardless of how many ids collide). Every
/// element is run through [`validate_agent`] and its findings are
/// concatenated in input order. `agent_count` reflects the array length
/// whenever the input was an array, even if elements are invalid.
pub fn validate_agents(
    thresholds: &Thresholds,
    now: DateTime<Utc>,
    agents: &Value,
) -> FleetValidation {
    let Some(list) = agents.as_array() else {
        return FleetValidation {
            valid: false,
            errors: vec!["Agents must be an array".to_string()],
            warnings: Vec::new(),
            agent_count: 0,
        };
    };

    if list.is_empty() {
        return FleetValidation {
            valid: false,
            errors: vec!["Agents array is empty".to_string()],
            warnings: Vec::new(),
            agent_count: 0,
        };
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let ids: Vec<&str> = list
        .iter()
        .filter_map(|agent| shape::str_field(agent, "id"))
        .filter(|id| !id.is_empty())
        .collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    if unique.len() != ids.len() {
        errors.push("Duplicate agent IDs detected".to_string());
    }

    for agent in list {
        let outcome = validate_agent(thresholds, now, agent);
        errors.extend(outcome.errors);
        warnings.extend(outcome.warnings);
    }

    if list.len() < thresholds.min_fleet_size {
        warnings.push(format!(
            "Only {} agents - expected at least {}+",
            list.len(),
            thresholds.expected_fleet_size
        ));
    }

    debug!(
        agent_count = list.len(),
        errors = errors.len(),
        warnings = warnings.len(),
        "fleet validation complete"
    );

    FleetValidation {
        valid: errors.is_empty(),
        errors,
        warnings,
        agent_count: list.len(),
    }
}
