//! Review endpoints

use axum::{extract::State, Json};
use chrono::Utc;
use review_core::SpacedRepetitionAlgorithm;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /review
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    let quality = Quality::new(payload.quality)?;
    let algorithm_kind = payload.algorithm.unwrap_or(state.config.default_algorithm);
    let algorithm = algorithm_kind.build();
    let now = Utc::now();

    let (next_state, next_due) = match payload.state {
        Some(current) => {
            current.validate()?;
            let result = algorithm.review(&current, quality, payload.mastery_level, now)?;
            (result.new_state, result.next_due)
        }
        None => {
            let initial = algorithm.initial_state(&payload.item_id, payload.item_type, quality, now)?;
            let due = initial.next_review_date;
            (initial, due)
        }
    };

    tracing::debug!(
        item_id = %next_state.item_id,
        algorithm = algorithm.name(),
        repetitions = next_state.repetitions,
        interval_days = next_state.interval_days,
        "Scheduled review"
    );

    Ok(Json(SubmitReviewResponse {
        next_state,
        next_due,
        algorithm: algorithm_kind,
    }))
}
