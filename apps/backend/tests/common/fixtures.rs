//! Test fixtures and factory functions for creating request bodies.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

/// Create a stored item state due `days_from_now` days (plus half a day) from
/// now, so the floored day count is stable while the request is in flight.
pub fn item_state(item_id: &str, days_from_now: i64, repetitions: u32) -> serde_json::Value {
    json!({
        "item_id": item_id,
        "item_type": "lesson",
        "easiness_factor": 2.5,
        "repetitions": repetitions,
        "interval_days": 6.0,
        "next_review_date": Utc::now() + Duration::days(days_from_now) + Duration::hours(12),
    })
}

/// Create a schedule build request body.
pub fn schedule_request(
    learner_id: Option<&str>,
    states: Vec<serde_json::Value>,
    mastery: serde_json::Value,
) -> serde_json::Value {
    json!({
        "learner_id": learner_id,
        "states": states,
        "titles": {},
        "mastery_by_item": mastery,
    })
}

/// Create a review submission body.
pub fn review_request(
    state: Option<serde_json::Value>,
    quality: u8,
    mastery_level: Option<&str>,
    algorithm: Option<&str>,
) -> serde_json::Value {
    json!({
        "item_id": "lesson-1",
        "item_type": "lesson",
        "state": state,
        "quality": quality,
        "mastery_level": mastery_level,
        "algorithm": algorithm,
    })
}

/// Create a completion history entry.
pub fn completion(item_id: &str, days_ago: i64, mastery_level: Option<&str>) -> serde_json::Value {
    json!({
        "item_id": item_id,
        "item_type": "drill",
        "title": format!("Drill {}", item_id),
        "completed_at": Utc::now() - Duration::days(days_ago),
        "mastery_level": mastery_level,
    })
}

/// Create a timed attempt.
pub fn attempt(completed_at: DateTime<Utc>, elapsed_seconds: f64) -> serde_json::Value {
    json!({
        "completed_at": completed_at,
        "elapsed_seconds": elapsed_seconds,
        "target_seconds": 120.0,
        "hints_used": 0,
    })
}
