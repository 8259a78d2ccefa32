//! Spaced repetition algorithm implementations.

pub mod mastery;
pub mod sm2;

use crate::error::{Result, ReviewError};
use crate::types::{ItemReviewState, ItemType, MasteryLevel, Quality, MS_PER_DAY};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub use mastery::MasteryAwareSm2;
pub use sm2::Sm2;

/// Output of one SM-2 recurrence step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sm2Outcome {
    pub easiness_factor: f64,
    pub repetitions: u32,
    pub interval_days: f64,
    pub next_review_date: DateTime<Utc>,
}

/// Result of scheduling an item after review.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub new_state: ItemReviewState,
    pub next_due: DateTime<Utc>,
}

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Run the recurrence over raw SM-2 values.
    fn compute(
        &self,
        quality: Quality,
        easiness_factor: f64,
        repetitions: u32,
        interval_days: f64,
        mastery: Option<MasteryLevel>,
        now: DateTime<Utc>,
    ) -> Result<Sm2Outcome>;

    /// State for an item completed for the first time.
    fn initial_state(
        &self,
        item_id: &str,
        item_type: ItemType,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<ItemReviewState>;

    /// Calculate the next state of an existing item after a review.
    fn review(
        &self,
        state: &ItemReviewState,
        quality: Quality,
        mastery: Option<MasteryLevel>,
        now: DateTime<Utc>,
    ) -> Result<SchedulingResult> {
        let outcome = self.compute(
            quality,
            state.easiness_factor,
            state.repetitions,
            state.interval_days,
            mastery,
            now,
        )?;

        Ok(SchedulingResult {
            new_state: ItemReviewState {
                item_id: state.item_id.clone(),
                item_type: state.item_type,
                easiness_factor: outcome.easiness_factor,
                repetitions: outcome.repetitions,
                interval_days: outcome.interval_days,
                next_review_date: outcome.next_review_date,
                last_quality: Some(quality),
            },
            next_due: outcome.next_review_date,
        })
    }
}

/// Algorithm options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Sm2,
    #[default]
    MasterySm2,
}

impl Algorithm {
    /// Get the algorithm name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sm2 => "sm2",
            Self::MasterySm2 => "mastery_sm2",
        }
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sm2" => Some(Self::Sm2),
            "mastery_sm2" => Some(Self::MasterySm2),
            _ => None,
        }
    }

    pub fn build(self) -> Box<dyn SpacedRepetitionAlgorithm> {
        match self {
            Self::Sm2 => Box::new(Sm2::default()),
            Self::MasterySm2 => Box::new(MasteryAwareSm2::default()),
        }
    }
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    Algorithm::parse(name).map(Algorithm::build)
}

/// SM-2 easiness adjustment for a quality score.
pub(crate) fn ease_delta(quality: Quality) -> f64 {
    let miss = f64::from(Quality::MAX - quality.value());
    0.1 - miss * (0.08 + miss * 0.02)
}

/// `now` shifted by a possibly fractional number of days.
pub(crate) fn due_after(now: DateTime<Utc>, interval_days: f64) -> Result<DateTime<Utc>> {
    // The cast saturates, so oversized intervals fail the checked add below.
    let millis = (interval_days * MS_PER_DAY as f64).round() as i64;
    Duration::try_milliseconds(millis)
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or(ReviewError::IntervalOutOfRange { value: interval_days })
}

/// Repetition count after a successful review.
pub(crate) fn next_repetition(repetitions: u32) -> Result<u32> {
    repetitions
        .checked_add(1)
        .ok_or(ReviewError::RepetitionOverflow { max: u32::MAX })
}
