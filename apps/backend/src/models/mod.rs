//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Re-export shared types from review-core
pub use review_core::{
    Algorithm, AttemptRecord, CompletionRecord, DailyDrillCandidate, DailyDrillStatus,
    ItemReviewState, ItemType, LoadRecommendation, MasteryDistribution, MasteryLevel, Quality,
    ReviewSchedule, TrendResult,
};

// === Review Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub item_id: String,
    pub item_type: ItemType,
    /// Current stored state; absent on the first completion of an item.
    #[serde(default)]
    pub state: Option<ItemReviewState>,
    pub quality: u8,
    #[serde(default)]
    pub mastery_level: Option<MasteryLevel>,
    #[serde(default)]
    pub algorithm: Option<Algorithm>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub next_state: ItemReviewState,
    pub next_due: DateTime<Utc>,
    pub algorithm: Algorithm,
}

// === Schedule Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct BuildScheduleRequest {
    /// When set, the built schedule is cached for the due-date filters.
    #[serde(default)]
    pub learner_id: Option<String>,
    pub states: Vec<ItemReviewState>,
    #[serde(default)]
    pub titles: HashMap<String, String>,
    #[serde(default)]
    pub mastery_by_item: HashMap<String, MasteryLevel>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleQuery {
    pub learner_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: Vec<ReviewSchedule>,
    pub built_at: DateTime<Utc>,
}

// === Analytics Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadRequest {
    pub due_today_count: u32,
    #[serde(default)]
    pub mastery_histogram: MasteryDistribution,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RetentionRequest {
    pub easiness_factor: f64,
    pub repetitions: u32,
    pub days_since_review: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RetentionResponse {
    pub probability: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendRequest {
    pub attempts: Vec<AttemptRecord>,
}

// === Daily Drill Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyDrillRequest {
    pub completions: Vec<CompletionRecord>,
    /// Number of distinct drills to draw; a single drill when absent.
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DailyDrillResponse {
    Single { candidate: Option<DailyDrillCandidate> },
    Many { candidates: Vec<DailyDrillCandidate> },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DrillStatusRequest {
    pub completion_count: usize,
    #[serde(default)]
    pub last_drill_at: Option<DateTime<Utc>>,
}

pub type DrillStatusResponse = DailyDrillStatus;
