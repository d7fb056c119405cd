//! Shared wire types for the fleetwatch QA engine.
//!
//! This crate provides the record shapes the engine consumes and the
//! report shapes it produces, so dashboard services and the engine agree
//! on one set of definitions. Field names are camelCase on the wire
//! because the records round-trip through the dashboard's key-value
//! blobs (`lastRunAtMs`, `criticalErrors`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AgentStatus
// ---------------------------------------------------------------------------

/// The fixed status vocabulary for agent records. Unrecognized strings are
/// tolerated by the engine and surfaced as warnings, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Ok,
    Error,
    Scheduled,
    Running,
    Idle,
    Fixed,
}

impl AgentStatus {
    pub const ALL: [AgentStatus; 6] = [
        AgentStatus::Ok,
        AgentStatus::Error,
        AgentStatus::Scheduled,
        AgentStatus::Running,
        AgentStatus::Idle,
        AgentStatus::Fixed,
    ];

    /// Parse a wire status string; `None` for anything outside the vocabulary.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ok" => Some(AgentStatus::Ok),
            "error" => Some(AgentStatus::Error),
            "scheduled" => Some(AgentStatus::Scheduled),
            "running" => Some(AgentStatus::Running),
            "idle" => Some(AgentStatus::Idle),
            "fixed" => Some(AgentStatus::Fixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Ok => "ok",
            AgentStatus::Error => "error",
            AgentStatus::Scheduled => "scheduled",
            AgentStatus::Running => "running",
            AgentStatus::Idle => "idle",
            AgentStatus::Fixed => "fixed",
        }
    }
}

// ---------------------------------------------------------------------------
// Agent records (engine input)
// ---------------------------------------------------------------------------

/// Operational telemetry for one agent. All fields are optional on the
/// wire; an agent that never ran has no `lastRunAtMs` or `lastDurationMs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run_at_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_run_at_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// One scheduled automation task tracked by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<AgentState>,
}

impl AgentRecord {
    /// Convert to the raw JSON shape the engine validates.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Progress records (engine input)
// ---------------------------------------------------------------------------

/// A counter/target pair for one tracked metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEntry {
    #[serde(default)]
    pub current: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

/// Follower/subscriber counters kept under `progress.goals`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalCounters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_followers: Option<GoalEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_subs: Option<GoalEntry>,
}

/// The progress blob as stored by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<GoalCounters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_goals: Option<std::collections::BTreeMap<String, GoalEntry>>,
}

impl ProgressSnapshot {
    /// Convert to the raw JSON shape the engine validates.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Validation outcomes (engine output)
// ---------------------------------------------------------------------------

/// Verdict for a single validated record: hard errors flip `valid`,
/// warnings never do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    /// An outcome carrying a single hard error.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![error.into()],
            warnings: Vec::new(),
        }
    }

    /// Build an outcome from collected findings; `valid` holds exactly
    /// when `errors` is empty.
    pub fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Verdict for a whole agent collection. `agent_count` reflects the input
/// length whenever the input was an array, even if elements are invalid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetValidation {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub agent_count: usize,
}

// ---------------------------------------------------------------------------
// QA report (engine output)
// ---------------------------------------------------------------------------

/// Per-status agent tally. Buckets are assigned by precedence (error,
/// then overdue, then ok, then scheduled); the overdue *list* in
/// [`QaSummary`] is computed independently and may overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(default)]
    pub ok: u64,
    #[serde(default)]
    pub error: u64,
    #[serde(default)]
    pub scheduled: u64,
    #[serde(default)]
    pub overdue: u64,
}

/// One entry in the overdue-agent alert list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueAgent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overdue_minutes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaSummary {
    #[serde(default)]
    pub agent_count: usize,
    #[serde(default)]
    pub status_counts: StatusCounts,
    #[serde(default)]
    pub overdue_agents: Vec<OverdueAgent>,
    #[serde(default)]
    pub total_errors: usize,
    #[serde(default)]
    pub total_warnings: usize,
}

/// Raw per-section validation results carried alongside the summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QaDetails {
    pub agents: FleetValidation,
    pub progress: ValidationOutcome,
}

/// Aggregate QA verdict for one snapshot of agents + progress data.
/// Constructed fresh on every check; never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaReport {
    pub timestamp: DateTime<Utc>,
    pub passed: bool,
    #[serde(default)]
    pub critical_errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub summary: QaSummary,
    pub details: QaDetails,
}
