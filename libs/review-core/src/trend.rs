//! Timed-attempt performance trend.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::AttemptRecord;

const WINDOW: usize = 5;
const THRESHOLD_PCT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Degrading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub trend: Trend,
    /// Change of the recent average time against the previous one, in percent.
    /// Negative means faster.
    pub avg_time_change_pct: f64,
    pub message: String,
}

impl TrendResult {
    fn stable(message: &str) -> Self {
        Self {
            trend: Trend::Stable,
            avg_time_change_pct: 0.0,
            message: message.to_string(),
        }
    }
}

/// Compare the newest five attempts against the five before them.
pub fn analyze_trend(attempts: &[AttemptRecord]) -> Result<TrendResult> {
    for attempt in attempts {
        attempt.validate()?;
    }

    if attempts.len() < 2 {
        return Ok(TrendResult::stable("Need more attempts to determine trend"));
    }

    let mut sorted: Vec<&AttemptRecord> = attempts.iter().collect();
    sorted.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    let recent = &sorted[..WINDOW.min(sorted.len())];
    let previous = sorted.get(WINDOW..(2 * WINDOW).min(sorted.len())).unwrap_or(&[]);

    if previous.is_empty() {
        return Ok(TrendResult::stable("Building performance baseline"));
    }

    let recent_avg = average_elapsed(recent);
    let previous_avg = average_elapsed(previous);
    if previous_avg == 0.0 {
        return Ok(TrendResult::stable("Performance stable"));
    }

    let change = (recent_avg - previous_avg) / previous_avg * 100.0;
    let result = if change < -THRESHOLD_PCT {
        TrendResult {
            trend: Trend::Improving,
            avg_time_change_pct: change,
            message: format!("Performance improving: {}% faster", change.round().abs()),
        }
    } else if change > THRESHOLD_PCT {
        TrendResult {
            trend: Trend::Degrading,
            avg_time_change_pct: change,
            message: format!("Performance degrading: {}% slower. Consider review.", change.round()),
        }
    } else {
        TrendResult {
            trend: Trend::Stable,
            avg_time_change_pct: change,
            message: "Performance stable".to_string(),
        }
    };
    Ok(result)
}

fn average_elapsed(attempts: &[&AttemptRecord]) -> f64 {
    attempts.iter().map(|a| a.elapsed_seconds).sum::<f64>() / attempts.len() as f64
}
