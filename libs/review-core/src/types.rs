//! Core types shared by the scheduling components.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ReviewError, Result};

/// Milliseconds in one scheduling day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Kind of training content an item refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Lesson,
    Lab,
    Drill,
}

impl ItemType {
    /// Get the item type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lesson => "lesson",
            Self::Lab => "lab",
            Self::Drill => "drill",
        }
    }
}

/// Competency tier reported by the content catalog, ordered from least to most
/// proficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MasteryLevel {
    Crawl,
    Walk,
    RunGuided,
    RunIndependent,
}

impl MasteryLevel {
    pub const ALL: [MasteryLevel; 4] = [
        Self::Crawl,
        Self::Walk,
        Self::RunGuided,
        Self::RunIndependent,
    ];

    /// Get the mastery level name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crawl => "crawl",
            Self::Walk => "walk",
            Self::RunGuided => "run-guided",
            Self::RunIndependent => "run-independent",
        }
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "crawl" => Some(Self::Crawl),
            "walk" => Some(Self::Walk),
            "run-guided" => Some(Self::RunGuided),
            "run-independent" => Some(Self::RunIndependent),
            _ => None,
        }
    }
}

/// Recall quality on the SM-2 scale (0 = blackout, 5 = perfect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    /// Validate a raw 0-5 score.
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(ReviewError::InvalidQuality { value });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Scores below 3 count as a failed recall.
    pub fn is_passing(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<u8> for Quality {
    type Error = ReviewError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.0
    }
}

/// Persisted spaced-repetition state of one item.
///
/// Created on the first completion, replaced after every review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReviewState {
    pub item_id: String,
    pub item_type: ItemType,
    pub easiness_factor: f64,
    pub repetitions: u32,
    pub interval_days: f64,
    pub next_review_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_quality: Option<Quality>,
}

impl ItemReviewState {
    /// Reject states a store should never have produced.
    pub fn validate(&self) -> Result<()> {
        validate_ease(self.easiness_factor)?;
        validate_interval(self.interval_days)
    }

    pub fn snapshot(&self) -> Sm2Snapshot {
        Sm2Snapshot {
            easiness_factor: self.easiness_factor,
            repetitions: self.repetitions,
            interval_days: self.interval_days,
        }
    }
}

/// SM-2 parameters captured in a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sm2Snapshot {
    pub easiness_factor: f64,
    pub repetitions: u32,
    pub interval_days: f64,
}

/// A completed item from the learner's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub item_id: String,
    pub item_type: ItemType,
    pub title: String,
    pub completed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastery_level: Option<MasteryLevel>,
}

/// A single timed attempt at a drill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub completed_at: DateTime<Utc>,
    pub elapsed_seconds: f64,
    pub target_seconds: f64,
    #[serde(default)]
    pub hints_used: u32,
}

impl AttemptRecord {
    pub fn validate(&self) -> Result<()> {
        if !self.elapsed_seconds.is_finite() || self.elapsed_seconds < 0.0 {
            return Err(ReviewError::InvalidRecord {
                field: "elapsed_seconds",
                value: self.elapsed_seconds,
            });
        }
        if !self.target_seconds.is_finite() || self.target_seconds < 0.0 {
            return Err(ReviewError::InvalidRecord {
                field: "target_seconds",
                value: self.target_seconds,
            });
        }
        Ok(())
    }
}

/// Count of items at each mastery level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryDistribution {
    #[serde(default)]
    pub crawl: u32,
    #[serde(default)]
    pub walk: u32,
    #[serde(default)]
    pub run_guided: u32,
    #[serde(default)]
    pub run_independent: u32,
}

impl MasteryDistribution {
    /// Tally the levels that are present; items without mastery data are skipped.
    pub fn from_levels<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = Option<MasteryLevel>>,
    {
        let mut dist = Self::default();
        for level in levels.into_iter().flatten() {
            dist.add(level);
        }
        dist
    }

    pub fn add(&mut self, level: MasteryLevel) {
        match level {
            MasteryLevel::Crawl => self.crawl = self.crawl.saturating_add(1),
            MasteryLevel::Walk => self.walk = self.walk.saturating_add(1),
            MasteryLevel::RunGuided => self.run_guided = self.run_guided.saturating_add(1),
            MasteryLevel::RunIndependent => self.run_independent = self.run_independent.saturating_add(1),
        }
    }

    pub fn count(&self, level: MasteryLevel) -> u32 {
        match level {
            MasteryLevel::Crawl => self.crawl,
            MasteryLevel::Walk => self.walk,
            MasteryLevel::RunGuided => self.run_guided,
            MasteryLevel::RunIndependent => self.run_independent,
        }
    }

    /// Widened so that four full buckets cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.crawl) + u64::from(self.walk) + u64::from(self.run_guided) + u64::from(self.run_independent)
    }
}

/// Whole days from `from` to `to`, floored so that any partial day counts
/// toward the earlier side.
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_milliseconds().div_euclid(MS_PER_DAY)
}

pub(crate) fn validate_ease(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ReviewError::NonFiniteEase { value })
    }
}

pub(crate) fn validate_interval(value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ReviewError::NegativeInterval { value })
    }
}
