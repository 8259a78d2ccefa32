//! Heuristic recall-probability estimate.
//!
//! Used for display only; it never feeds back into scheduling.

use crate::error::{ReviewError, Result};
use crate::types::validate_ease;

const EASE_FLOOR: f64 = 1.3;
const EASE_SPAN: f64 = 1.7;
const DECAY_HORIZON_DAYS: f64 = 30.0;

/// Estimate the probability, in `[0.1, 1.0]`, that an item is still recalled
/// `days_since_review` days after its last review.
pub fn predict_retention(easiness_factor: f64, repetitions: u32, days_since_review: f64) -> Result<f64> {
    validate_ease(easiness_factor)?;
    if !days_since_review.is_finite() || days_since_review < 0.0 {
        return Err(ReviewError::NegativeDays {
            value: days_since_review,
        });
    }

    let base = (easiness_factor - EASE_FLOOR) / EASE_SPAN;
    let repetition_bonus = (f64::from(repetitions) * 0.05).min(0.3);
    let decay = (1.0 - days_since_review / DECAY_HORIZON_DAYS).max(0.0);

    Ok(((base + repetition_bonus) * decay).clamp(0.1, 1.0))
}
