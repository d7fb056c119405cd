//! Public engine surface.

use chrono::{DateTime, Utc};
use fw_api_types::{FleetValidation, QaReport, ValidationOutcome};
use serde_json::Value;

use crate::thresholds::Thresholds;
use crate::{agent, fleet, goals, progress, report};

/// The validation engine, configured once with [`Thresholds`].
///
/// Stateless beyond its configuration: every call is a pure pass over its
/// input, so one engine may be shared freely across request handlers.
/// Each validating call reads the wall clock once; the `*_at` variants
/// take the instant explicitly for deterministic tests.
#[derive(Debug, Clone)]
pub struct QaEngine {
    thresholds: Thresholds,
}

impl QaEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Engine with the stock dashboard thresholds.
    pub fn with_defaults() -> Self {
        Self::new(Thresholds::default())
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Validate one agent record.
    pub fn validate_agent(&self, agent: &Value) -> ValidationOutcome {
        self.validate_agent_at(Utc::now(), agent)
    }

    pub fn validate_agent_at(&self, now: DateTime<Utc>, agent: &Value) -> ValidationOutcome {
        agent::validate_agent(&self.thresholds, now, agent)
    }

    /// Validate the whole agent collection.
    pub fn validate_agents(&self, agents: &Value) -> FleetValidation {
        self.validate_agents_at(Utc::now(), agents)
    }

    pub fn validate_agents_at(&self, now: DateTime<Utc>, agents: &Value) -> FleetValidation {
        fleet::validate_agents(&self.thresholds, now, agents)
    }

    /// Validate the `dailyGoals` object. Clock-free.
    pub fn validate_daily_goals(&self, daily_goals: &Value) -> ValidationOutcome {
        goals::validate_daily_goals(&self.thresholds, daily_goals)
    }

    /// Validate the progress blob.
    pub fn validate_progress(&self, progress: &Value) -> ValidationOutcome {
        self.validate_progress_at(Utc::now(), progress)
    }

    pub fn validate_progress_at(&self, now: DateTime<Utc>, progress: &Value) -> ValidationOutcome {
        progress::validate_progress(&self.thresholds, now, progress)
    }

    /// Run the aggregate QA check over `{ agents?, progress?, actualPosts? }`.
    pub fn run_qa_check(&self, data: &Value) -> QaReport {
        self.run_qa_check_at(Utc::now(), data)
    }

    pub fn run_qa_check_at(&self, now: DateTime<Utc>, data: &Value) -> QaReport {
        report::run_qa_check(&self.thresholds, now, data)
    }
}

impl Default for QaEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
