use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fields an agent record must carry to be structurally valid.
pub const AGENT_REQUIRED_FIELDS: [&str; 2] = ["id", "name"];

/// Telemetry fields expected inside `state` once an agent is scheduled.
pub const STATE_REQUIRED_FIELDS: [&str; 3] = ["lastRunAtMs", "nextRunAtMs", "lastDurationMs"];

/// Daily-goal keys the dashboard tracks. Keys outside this set are
/// ignored by the validators.
pub const DAILY_GOAL_KEYS: [&str; 6] = [
    "contacts",
    "responses",
    "posts",
    "engagement",
    "xFollowers",
    "ytSubs",
];

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Tunable limits for the validation rules, loadable from TOML.
///
/// The engine takes a `Thresholds` value at construction time; there is no
/// module-level state. Defaults match the dashboard's operating policy:
/// 8-char ids, 30-minute overdue alarm, 1-hour staleness and run-duration
/// envelopes, 365-day timestamp plausibility window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum agent id length, in characters.
    #[serde(default = "default_min_id_length")]
    pub min_id_length: usize,
    /// Past this many milliseconds late, an overdue run is a hard error.
    #[serde(default = "default_overdue_hard_ms")]
    pub overdue_hard_ms: i64,
    /// Runs longer than this draw a duration warning.
    #[serde(default = "default_long_run_ms")]
    pub long_run_ms: i64,
    /// Timestamps outside now +/- this many days look implausible.
    #[serde(default = "default_plausible_window_days")]
    pub plausible_window_days: i64,
    /// Fleets smaller than this draw a low-count warning.
    #[serde(default = "default_min_fleet_size")]
    pub min_fleet_size: usize,
    /// Fleet size the low-count warning tells operators to expect.
    #[serde(default = "default_expected_fleet_size")]
    pub expected_fleet_size: usize,
    /// Progress older than this draws a staleness warning.
    #[serde(default = "default_stale_progress_ms")]
    pub stale_progress_ms: i64,
    /// A goal counter above `target * multiplier` looks suspicious.
    #[serde(default = "default_suspicious_goal_multiplier")]
    pub suspicious_goal_multiplier: f64,
    /// The zero-engagement heuristic fires when more than this many
    /// agents count as ok.
    #[serde(default = "default_active_fleet_floor")]
    pub active_fleet_floor: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_id_length: default_min_id_length(),
            overdue_hard_ms: default_overdue_hard_ms(),
            long_run_ms: default_long_run_ms(),
            plausible_window_days: default_plausible_window_days(),
            min_fleet_size: default_min_fleet_size(),
            expected_fleet_size: default_expected_fleet_size(),
            stale_progress_ms: default_stale_progress_ms(),
            suspicious_goal_multiplier: default_suspicious_goal_multiplier(),
            active_fleet_floor: default_active_fleet_floor(),
        }
    }
}

fn default_min_id_length() -> usize {
    8
}
fn default_overdue_hard_ms() -> i64 {
    30 * 60 * 1000
}
fn default_long_run_ms() -> i64 {
    60 * 60 * 1000
}
fn default_plausible_window_days() -> i64 {
    365
}
fn default_min_fleet_size() -> usize {
    5
}
fn default_expected_fleet_size() -> usize {
    10
}
fn default_stale_progress_ms() -> i64 {
    60 * 60 * 1000
}
fn default_suspicious_goal_multiplier() -> f64 {
    10.0
}
fn default_active_fleet_floor() -> usize {
    5
}

impl Thresholds {
    /// Load thresholds from a TOML file, rejecting semantically invalid
    /// values. Missing keys fall back to defaults.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ThresholdsError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|e| ThresholdsError::Io(e.to_string()))?;
        Self::from_toml_str(&text)
    }

    /// Parse thresholds from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, ThresholdsError> {
        let thresholds: Thresholds =
            toml::from_str(text).map_err(|e| ThresholdsError::Parse(e.to_string()))?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Serialize thresholds to a TOML string.
    pub fn to_toml(&self) -> Result<String, ThresholdsError> {
        self.validate()?;
        toml::to_string_pretty(self).map_err(|e| ThresholdsError::Parse(e.to_string()))
    }

    /// Semantic validation for limits that are not expressible via type
    /// checks alone.
    pub fn validate(&self) -> Result<(), ThresholdsError> {
        if self.min_id_length == 0 {
            return Err(ThresholdsError::Validation(
                "min_id_length must be at least 1".to_string(),
            ));
        }
        if self.overdue_hard_ms <= 0 {
            return Err(ThresholdsError::Validation(
                "overdue_hard_ms must be positive".to_string(),
            ));
        }
        if self.long_run_ms <= 0 {
            return Err(ThresholdsError::Validation(
                "long_run_ms must be positive".to_string(),
            ));
        }
        if self.plausible_window_days <= 0 {
            return Err(ThresholdsError::Validation(
                "plausible_window_days must be positive".to_string(),
            ));
        }
        if self.stale_progress_ms <= 0 {
            return Err(ThresholdsError::Validation(
                "stale_progress_ms must be positive".to_string(),
            ));
        }
        if !(self.suspicious_goal_multiplier > 0.0) {
            return Err(ThresholdsError::Validation(
                "suspicious_goal_multiplier must be positive".to_string(),
            ));
        }
        if self.min_fleet_size > self.expected_fleet_size {
            return Err(ThresholdsError::Validation(format!(
                "min_fleet_size {} exceeds expected_fleet_size {}",
                self.min_fleet_size, self.expected_fleet_size
            )));
        }
        Ok(())
    }

    /// The hard overdue limit expressed in whole minutes, for messages.
    pub fn overdue_hard_minutes(&self) -> i64 {
        self.overdue_hard_ms / 60_000
    }

    /// The plausibility window expressed in milliseconds.
    pub fn plausible_window_ms(&self) -> i64 {
        self.plausible_window_days * 24 * 60 * 60 * 1000
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ThresholdsError {
    #[error("io: {0}")]
    Io(String),
    #[error("parse: {0}")]
    Parse(String),
    #[error("validation: {0}")]
    Validation(String),
}
