//! Validation engine for the fleetwatch agent dashboard.
//!
//! The engine is the schema gate between the dashboard's key-value store
//! (opaque JSON blobs) and its status pages: pure, synchronous functions
//! that take a snapshot of agent and progress data and return a verdict
//! plus categorized findings. Hard errors (missing required fields,
//! duplicate ids, out-of-policy numbers, 30+ minute overdue runs) flip
//! validity; everything else is an advisory warning.
//!
//! Every validator is total over arbitrary [`serde_json::Value`] input --
//! malformed data becomes a failed outcome value, never a panic or an
//! `Err`. The wall clock is read once per call and threaded through all
//! nested checks; `*_at` variants accept an explicit instant for
//! deterministic tests.

pub mod agent;
pub mod engine;
pub mod fleet;
pub mod goals;
pub mod progress;
pub mod report;
pub mod shape;
pub mod thresholds;

pub use engine::QaEngine;
pub use thresholds::{
    Thresholds, ThresholdsError, AGENT_REQUIRED_FIELDS, DAILY_GOAL_KEYS, STATE_REQUIRED_FIELDS,
};
