//! Mastery-aware SM-2.
//!
//! Runs the SM-2 recurrence with per-tier adjustments: an easiness bonus
//! applied before clamping to `[minimum_ease, maximum_ease]`, a shorter
//! failed-recall interval for higher tiers, and a tier-specific interval for
//! the second successful review.

use super::{due_after, ease_delta, next_repetition, Sm2, Sm2Outcome, SpacedRepetitionAlgorithm};
use crate::error::Result;
use crate::types::{validate_ease, validate_interval, ItemReviewState, ItemType, MasteryLevel, Quality};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct MasteryAwareSm2 {
    pub base: Sm2,
    pub maximum_ease: f64,
}

impl Default for MasteryAwareSm2 {
    fn default() -> Self {
        Self {
            base: Sm2::default(),
            maximum_ease: 3.0,
        }
    }
}

/// Easiness bonus added before clamping.
pub fn ease_bonus(mastery: Option<MasteryLevel>) -> f64 {
    match mastery {
        None | Some(MasteryLevel::Crawl) => 0.0,
        Some(MasteryLevel::Walk) => 0.1,
        Some(MasteryLevel::RunGuided) => 0.2,
        Some(MasteryLevel::RunIndependent) => 0.3,
    }
}

/// Interval in days after a failed recall.
pub fn failed_recall_interval(mastery: Option<MasteryLevel>) -> f64 {
    match mastery {
        Some(MasteryLevel::RunIndependent) => 0.5,
        Some(MasteryLevel::RunGuided) => 0.75,
        _ => 1.0,
    }
}

/// Interval in days for the second successful review.
pub fn second_review_interval(mastery: Option<MasteryLevel>) -> f64 {
    match mastery {
        None | Some(MasteryLevel::Crawl) => 5.0,
        Some(MasteryLevel::Walk) => 6.0,
        Some(MasteryLevel::RunGuided) => 7.0,
        Some(MasteryLevel::RunIndependent) => 8.0,
    }
}

impl SpacedRepetitionAlgorithm for MasteryAwareSm2 {
    fn name(&self) -> &'static str {
        "mastery_sm2"
    }

    fn compute(
        &self,
        quality: Quality,
        easiness_factor: f64,
        repetitions: u32,
        interval_days: f64,
        mastery: Option<MasteryLevel>,
        now: DateTime<Utc>,
    ) -> Result<Sm2Outcome> {
        validate_ease(easiness_factor)?;
        validate_interval(interval_days)?;

        let new_ease = (easiness_factor + ease_delta(quality) + ease_bonus(mastery))
            .clamp(self.base.minimum_ease, self.maximum_ease);

        let (new_repetitions, new_interval) = if quality.is_passing() {
            let interval = match repetitions {
                0 => self.base.first_interval,
                1 => second_review_interval(mastery),
                _ => (interval_days * new_ease).round(),
            };
            (next_repetition(repetitions)?, interval)
        } else {
            (0, failed_recall_interval(mastery))
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
        self.base.initial_state(item_id, item_type, quality, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReviewError;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn q(value: u8) -> Quality {
        Quality::new(value).unwrap()
    }

    const TIERS: [Option<MasteryLevel>; 5] = [
        None,
        Some(MasteryLevel::Crawl),
        Some(MasteryLevel::Walk),
        Some(MasteryLevel::RunGuided),
        Some(MasteryLevel::RunIndependent),
    ];

    #[test]
    fn first_repetition_is_one_day_for_every_tier() {
        let algo = MasteryAwareSm2::default();
        for mastery in TIERS {
            let result = algo.compute(q(4), 2.5, 0, 0.0, mastery, now()).unwrap();
            assert_eq!(result.repetitions, 1);
            assert_eq!(result.interval_days, 1.0, "tier {:?}", mastery);
        }
    }

    #[test]
    fn second_repetition_uses_tier_constant() {
        let algo = MasteryAwareSm2::default();
        let expected = [5.0, 5.0, 6.0, 7.0, 8.0];
        for (mastery, interval) in TIERS.into_iter().zip(expected) {
            let result = algo.compute(q(5), 2.6, 1, 1.0, mastery, now()).unwrap();
            assert_eq!(result.repetitions, 2);
            assert_eq!(result.interval_days, interval, "tier {:?}", mastery);
        }
    }

    #[test]
    fn failed_recall_interval_by_tier() {
        let algo = MasteryAwareSm2::default();
        let expected = [1.0, 1.0, 1.0, 0.75, 0.5];
        for (mastery, interval) in TIERS.into_iter().zip(expected) {
            let result = algo.compute(q(1), 2.5, 4, 30.0, mastery, now()).unwrap();
            assert_eq!(result.repetitions, 0);
            assert_eq!(result.interval_days, interval, "tier {:?}", mastery);
        }
    }

    #[test]
    fn run_independent_lapse_is_due_in_twelve_hours() {
        let algo = MasteryAwareSm2::default();
        let result = algo
            .compute(q(0), 2.5, 2, 6.0, Some(MasteryLevel::RunIndependent), now())
            .unwrap();
        assert_eq!(result.next_review_date, now() + Duration::hours(12));
    }

    #[test]
    fn bonus_is_applied_before_clamping() {
        let algo = MasteryAwareSm2::default();
        let walk = algo
            .compute(q(4), 2.5, 2, 6.0, Some(MasteryLevel::Walk), now())
            .unwrap();
        assert!((walk.easiness_factor - 2.6).abs() < 1e-9);

        let capped = algo
            .compute(q(5), 2.9, 2, 6.0, Some(MasteryLevel::RunIndependent), now())
            .unwrap();
        assert_eq!(capped.easiness_factor, 3.0);
    }

    #[test]
    fn ease_stays_within_bounds() {
        let algo = MasteryAwareSm2::default();
        for mastery in TIERS {
            for quality in 0..=5 {
                for ease in [1.0, 1.3, 2.0, 2.5, 3.0, 3.5] {
                    let result = algo.compute(q(quality), ease, 3, 10.0, mastery, now()).unwrap();
                    assert!(
                        (1.3..=3.0).contains(&result.easiness_factor),
                        "ease {} out of bounds",
                        result.easiness_factor
                    );
                }
            }
        }
    }

    #[test]
    fn later_repetitions_scale_by_clamped_ease() {
        let algo = MasteryAwareSm2::default();
        let result = algo
            .compute(q(5), 2.9, 3, 10.0, Some(MasteryLevel::RunIndependent), now())
            .unwrap();
        assert_eq!(result.interval_days, 30.0);
    }

    #[test]
    fn oversized_interval_is_rejected_for_every_tier() {
        let algo = MasteryAwareSm2::default();
        for mastery in TIERS {
            let err = algo.compute(q(5), 2.5, 5, 1.0e8, mastery, now()).unwrap_err();
            assert!(matches!(err, ReviewError::IntervalOutOfRange { .. }), "tier {:?}", mastery);
        }
    }

    #[test]
    fn repetition_count_at_maximum_is_rejected() {
        let algo = MasteryAwareSm2::default();
        let err = algo
            .compute(q(5), 2.5, u32::MAX, 10.0, Some(MasteryLevel::Walk), now())
            .unwrap_err();
        assert_eq!(err, ReviewError::RepetitionOverflow { max: u32::MAX });
    }
}
