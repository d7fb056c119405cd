use chrono::{DateTime, TimeZone, Utc};
use fw_qa::QaEngine;
use serde_json::{json, Value};

fn frozen_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn engine() -> QaEngine {
    QaEngine::with_defaults()
}

fn valid_progress(now: DateTime<Utc>) -> Value {
    json!({
        "lastUpdated": now.to_rfc3339(),
        "updatedBy": "test",
        "goals": {
            "xFollowers": { "current": 35, "target": 100 },
            "youtubeSubs": { "current": 108, "target": 300 }
        },
        "dailyGoals": {
            "contacts": { "current": 5, "target": 20 },
            "responses": { "current": 1, "target": 2 },
            "posts": { "current": 2, "target": 3 },
            "engagement": { "current": 10, "target": 15 },
            "xFollowers": { "current": 3, "target": 16 },
            "ytSubs": { "current": 5, "target": 17 }
        }
    })
}

#[test]
fn accepts_valid_progress() {
    let now = frozen_now();
    let result = engine().validate_progress_at(now, &valid_progress(now));
    assert!(result.valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn rejects_non_object() {
    let now = frozen_now();
    for input in [json!(null), json!("progress"), json!(9)] {
        let result = engine().validate_progress_at(now, &input);
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Progress must be an object".to_string()]);
    }
}

// ---------------------------------------------------------------------------
// lastUpdated freshness
// ---------------------------------------------------------------------------

#[test]
fn warns_on_missing_last_updated() {
    let progress = json!({ "goals": { "xFollowers": { "current": 35 } } });
    let result = engine().validate_progress_at(frozen_now(), &progress);
    assert!(result.warnings.iter().any(|w| w.contains("no lastUpdated")));
}

#[test]
fn warns_on_stale_last_updated() {
    let now = frozen_now();
    let progress = json!({
        "lastUpdated": (now - chrono::Duration::hours(2)).to_rfc3339(),
        "goals": { "xFollowers": { "current": 35 } }
    });
    let result = engine().validate_progress_at(now, &progress);
    assert!(result.valid);
    assert!(result.warnings.iter().any(|w| w.contains("120 minutes ago")));
}

#[test]
fn fresh_last_updated_draws_no_staleness_warning() {
    let now = frozen_now();
    let progress = json!({
        "lastUpdated": (now - chrono::Duration::minutes(5)).to_rfc3339()
    });
    let result = engine().validate_progress_at(now, &progress);
    assert!(!result.warnings.iter().any(|w| w.contains("minutes ago")));
}

#[test]
fn unparseable_last_updated_is_ignored() {
    let progress = json!({ "lastUpdated": "not-a-timestamp" });
    let result = engine().validate_progress_at(frozen_now(), &progress);
    assert!(result.valid);
    assert!(!result.warnings.iter().any(|w| w.contains("minutes ago")));
    assert!(!result.warnings.iter().any(|w| w.contains("no lastUpdated")));
}

#[test]
fn numeric_last_updated_is_read_as_epoch_ms() {
    let now = frozen_now();
    let two_hours_ago = now.timestamp_millis() - 7_200_000;
    let progress = json!({ "lastUpdated": two_hours_ago });
    let result = engine().validate_progress_at(now, &progress);
    assert!(result.warnings.iter().any(|w| w.contains("120 minutes ago")));
}

// ---------------------------------------------------------------------------
// Goal counters
// ---------------------------------------------------------------------------

#[test]
fn rejects_non_numeric_follower_count() {
    let now = frozen_now();
    let progress = json!({
        "lastUpdated": now.to_rfc3339(),
        "goals": { "xFollowers": { "current": "thirty-five" } }
    });
    let result = engine().validate_progress_at(now, &progress);
    assert!(!result.valid);
    assert!(result
        .errors
        .contains(&"goals.xFollowers.current must be a number".to_string()));
}

#[test]
fn rejects_non_numeric_youtube_subs() {
    let now = frozen_now();
    let progress = json!({
        "lastUpdated": now.to_rfc3339(),
        "goals": { "youtubeSubs": {} }
    });
    let result = engine().validate_progress_at(now, &progress);
    assert!(!result.valid);
    assert!(result
        .errors
        .contains(&"goals.youtubeSubs.current must be a number".to_string()));
}

#[test]
fn absent_counter_sub_objects_are_not_flagged() {
    let now = frozen_now();
    let progress = json!({
        "lastUpdated": now.to_rfc3339(),
        "goals": { "xFollowers": null, "youtubeSubs": null }
    });
    let result = engine().validate_progress_at(now, &progress);
    assert!(result.errors.is_empty());
}

// ---------------------------------------------------------------------------
// dailyGoals delegation
// ---------------------------------------------------------------------------

#[test]
fn warns_on_missing_daily_goals() {
    let now = frozen_now();
    let progress = json!({ "lastUpdated": now.to_rfc3339() });
    let result = engine().validate_progress_at(now, &progress);
    assert!(result.valid);
    assert!(result.warnings.contains(&"Progress missing dailyGoals".to_string()));
}

#[test]
fn null_daily_goals_counts_as_missing() {
    let now = frozen_now();
    let progress = json!({ "lastUpdated": now.to_rfc3339(), "dailyGoals": null });
    let result = engine().validate_progress_at(now, &progress);
    assert!(result.warnings.contains(&"Progress missing dailyGoals".to_string()));
}

#[test]
fn merges_daily_goal_findings() {
    let now = frozen_now();
    let progress = json!({
        "lastUpdated": now.to_rfc3339(),
        "dailyGoals": { "contacts": { "current": -5, "target": 20 } }
    });
    let result = engine().validate_progress_at(now, &progress);
    assert!(!result.valid);
    assert!(result
        .errors
        .contains(&"dailyGoals.contacts.current cannot be negative".to_string()));
    assert!(result
        .warnings
        .contains(&"Missing dailyGoal key: responses".to_string()));
}

#[test]
fn non_object_daily_goals_is_hard_error() {
    let now = frozen_now();
    let progress = json!({ "lastUpdated": now.to_rfc3339(), "dailyGoals": "x" });
    let result = engine().validate_progress_at(now, &progress);
    assert!(!result.valid);
    assert!(result.errors.contains(&"dailyGoals must be an object".to_string()));
}

// ---------------------------------------------------------------------------
// Robustness
// ---------------------------------------------------------------------------

#[test]
fn survives_deeply_nested_nulls() {
    let now = frozen_now();
    let progress = json!({
        "lastUpdated": now.to_rfc3339(),
        "goals": { "xFollowers": null, "youtubeSubs": null },
        "dailyGoals": null
    });
    let result = engine().validate_progress_at(now, &progress);
    assert!(result.valid);
}

#[test]
fn errors_nonempty_iff_invalid() {
    let now = frozen_now();
    let inputs = [
        valid_progress(now),
        json!(null),
        json!({}),
        json!({ "goals": { "xFollowers": { "current": "x" } } }),
    ];
    for input in &inputs {
        let result = engine().validate_progress_at(now, input);
        assert_eq!(result.valid, result.errors.is_empty());
    }
}

#[test]
fn validation_is_idempotent_under_frozen_clock() {
    let now = frozen_now();
    let progress = valid_progress(now);
    assert_eq!(
        engine().validate_progress_at(now, &progress),
        engine().validate_progress_at(now, &progress)
    );
}
