//! Error types for review-core.

use thiserror::Error;

/// Result type alias using ReviewError.
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Input rejected by one of the scheduling computations.
///
/// Empty collections are never an error; they resolve to sentinel results
/// (`None`, an empty list, or an "insufficient data" trend).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReviewError {
    #[error("quality must be between 0 and 5, got {value}")]
    InvalidQuality { value: u8 },

    #[error("interval must be a non-negative number of days, got {value}")]
    NegativeInterval { value: f64 },

    #[error("an interval of {value} days puts the due date out of range")]
    IntervalOutOfRange { value: f64 },

    #[error("repetition count cannot exceed {max}")]
    RepetitionOverflow { max: u32 },

    #[error("easiness factor must be finite, got {value}")]
    NonFiniteEase { value: f64 },

    #[error("days since review must be non-negative, got {value}")]
    NegativeDays { value: f64 },

    #[error("invalid {field} on record: {value}")]
    InvalidRecord { field: &'static str, value: f64 },
}
