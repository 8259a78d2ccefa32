//! Daily review quota recommendation.

use serde::{Deserialize, Serialize};

use crate::types::{MasteryDistribution, MasteryLevel};

const RECOMMENDED_CAP: u32 = 15;
const MINIMUM_FLOOR: u32 = 3;
const MAXIMUM_CAP: u32 = 20;
const MASTERED_SHARE: f64 = 0.7;
const MASTERED_BONUS: u32 = 3;

/// Recommended number of reviews for today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRecommendation {
    pub minimum: u32,
    pub recommended: u32,
    pub maximum: u32,
    pub reasoning: String,
}

/// Size today's review session from the due count and the learner's mastery
/// spread. A histogram dominated by fully independent items earns a few extra
/// reviews.
pub fn recommended_load(due_today: u32, distribution: &MasteryDistribution) -> LoadRecommendation {
    let mut recommended = if due_today > 10 {
        RECOMMENDED_CAP.min(ceil_scaled(due_today, 0.75))
    } else if due_today < 3 {
        MINIMUM_FLOOR.max(due_today)
    } else {
        due_today
    };

    let total = distribution.total();
    if total > 0 {
        let mastered = distribution.count(MasteryLevel::RunIndependent);
        if f64::from(mastered) / total as f64 > MASTERED_SHARE {
            recommended = (recommended + MASTERED_BONUS).min(RECOMMENDED_CAP);
        }
    }

    LoadRecommendation {
        minimum: MINIMUM_FLOOR.max(ceil_scaled(recommended, 0.6)),
        recommended,
        maximum: MAXIMUM_CAP.min(ceil_scaled(recommended, 1.5)),
        reasoning: reasoning(due_today).to_string(),
    }
}

fn reasoning(due_today: u32) -> &'static str {
    match due_today {
        0 => "No reviews due today. Great job staying current!",
        n if n > 15 => "You have many overdue reviews. Focus on catching up gradually.",
        n if n > 10 => "Several reviews due. Tackle them in priority order.",
        _ => "Optimal review load. Complete these to maintain retention.",
    }
}

fn ceil_scaled(value: u32, factor: f64) -> u32 {
    (f64::from(value) * factor).ceil() as u32
}
