//! Review priority classification.

use crate::types::MasteryLevel;
use serde::{Deserialize, Serialize};

/// Urgency bucket of a scheduled review, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, 0 being the most urgent.
    pub fn severity(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Classify a review by mastery and signed days until it is due.
///
/// Overdue reviews are always critical. Items with no mastery data are treated
/// like `crawl`.
pub fn classify(mastery: Option<MasteryLevel>, days_until_review: i64) -> Priority {
    let novice = matches!(mastery, None | Some(MasteryLevel::Crawl));
    match days_until_review {
        d if d < 0 => Priority::Critical,
        0..=1 if novice => Priority::Critical,
        0..=1 if mastery == Some(MasteryLevel::Walk) => Priority::High,
        0..=1 => Priority::Medium,
        2..=3 if novice => Priority::High,
        2..=7 => Priority::Medium,
        _ => Priority::Low,
    }
}
