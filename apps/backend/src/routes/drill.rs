//! Daily drill endpoints
//!
//! Selection only: blocking access until the drill is done is the client's job.

use axum::{extract::State, Json};
use chrono::Utc;
use review_core::drill;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /daily-drill
pub async fn select(
    State(state): State<AppState>,
    Json(request): Json<DailyDrillRequest>,
) -> Result<Json<DailyDrillResponse>> {
    let now = Utc::now();
    let mut rng = state
        .rng
        .lock()
        .map_err(|_| ApiError::Internal("drill rng lock poisoned".to_string()))?;

    let response = match request.count {
        None => DailyDrillResponse::Single {
            candidate: drill::select_one(&request.completions, now, &mut *rng),
        },
        Some(count) => DailyDrillResponse::Many {
            candidates: drill::select_many(&request.completions, count, now, &mut *rng),
        },
    };

    tracing::debug!(completions = request.completions.len(), "Selected daily drill");
    Ok(Json(response))
}

/// POST /daily-drill/status
pub async fn status(Json(request): Json<DrillStatusRequest>) -> Json<DrillStatusResponse> {
    Json(drill::drill_status(
        request.completion_count,
        request.last_drill_at,
        Utc::now(),
    ))
}
