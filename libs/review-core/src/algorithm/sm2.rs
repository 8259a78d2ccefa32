//! SM-2 spaced repetition algorithm.
//!
//! Canonical SuperMemo 2 recurrence with configurable parameters. Only the
//! lower easiness bound is enforced.

use super::{due_after, ease_delta, next_repetition, SchedulingResult, Sm2Outcome, SpacedRepetitionAlgorithm};
use crate::error::Result;
use crate::types::{validate_ease, validate_interval, ItemReviewState, ItemType, MasteryLevel, Quality};
use chrono::{DateTime, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub first_interval: f64,
    pub second_interval: f64,
    pub failed_interval: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            first_interval: 1.0,
            second_interval: 6.0,
            failed_interval: 1.0,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn compute(
        &self,
        quality: Quality,
        easiness_factor: f64,
        repetitions: u32,
        interval_days: f64,
        _mastery: Option<MasteryLevel>,
        now: DateTime<Utc>,
    ) -> Result<Sm2Outcome> {
        validate_ease(easiness_factor)?;
        validate_interval(interval_days)?;

        let new_ease = (easiness_factor + ease_delta(quality)).max(self.minimum_ease);

        let (new_repetitions, new_interval) = if quality.is_passing() {
            let interval = match repetitions {
                0 => self.first_interval,
                1 => self.second_interval,
                _ => (interval_days * new_ease).round(),
            };
            (next_repetition(repetitions)?, interval)
        } else {
            (0, self.failed_interval)
        };

        Ok(Sm2Outcome {
            easiness_factor: new_ease,
            repetitions: new_repetitions,
            interval_days: new_interval,
            next_review_date: due_after(now, new_interval)?,
        })
    }

    fn initial_state(
        &self,
        item_id: &str,
        item_type: ItemType,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<ItemReviewState> {
        Ok(ItemReviewState {
            item_id: item_id.to_string(),
            item_type,
            easiness_factor: self.initial_ease,
            repetitions: 1,
            interval_days: self.first_interval,
            next_review_date: due_after(now, self.first_interval)?,
            last_quality: Some(quality),
        })
    }
}

impl Sm2 {
    /// Review an item, ignoring mastery.
    pub fn schedule(
        &self,
        state: &ItemReviewState,
        quality: Quality,
        now: DateTime<Utc>,
    ) -> Result<SchedulingResult> {
        self.review(state, quality, None, now)
    }
}
