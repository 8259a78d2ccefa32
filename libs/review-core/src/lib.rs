//! Core review scheduling library shared by the backend service.
//!
//! Provides:
//! - SM-2 and mastery-aware SM-2 recurrences
//! - Review priority classification and schedule building
//! - Daily review load recommendation and retention estimates
//! - Weighted daily drill selection with an injectable random source
//! - Timed-attempt performance trends
//!
//! Every function is pure: the current time and randomness are passed in.

pub mod algorithm;
pub mod cache;
pub mod drill;
pub mod error;
pub mod load;
pub mod priority;
pub mod retention;
pub mod schedule;
pub mod trend;
pub mod types;

pub use algorithm::{get_algorithm, Algorithm, SchedulingResult, Sm2Outcome, SpacedRepetitionAlgorithm};
pub use cache::{CachedSchedule, ScheduleCache};
pub use drill::{
    drill_status, has_drill_today, select_many, select_one, DailyDrillCandidate, DailyDrillStatus,
    RandomSource, RngSource,
};
pub use error::{Result, ReviewError};
pub use load::{recommended_load, LoadRecommendation};
pub use priority::{classify, Priority};
pub use retention::predict_retention;
pub use schedule::{build_schedule, due_this_week, due_today, refresh_schedule, ReviewSchedule};
pub use trend::{analyze_trend, Trend, TrendResult};
pub use types::{
    AttemptRecord, CompletionRecord, ItemReviewState, ItemType, MasteryDistribution, MasteryLevel,
    Quality, Sm2Snapshot,
};
