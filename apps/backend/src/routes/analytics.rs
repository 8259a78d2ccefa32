//! Load, retention and trend endpoints

use axum::Json;
use review_core::{analyze_trend, predict_retention, recommended_load};

use crate::error::Result;
use crate::models::*;

/// POST /load
pub async fn load(Json(request): Json<LoadRequest>) -> Json<LoadRecommendation> {
    Json(recommended_load(request.due_today_count, &request.mastery_histogram))
}

/// POST /retention
pub async fn retention(Json(request): Json<RetentionRequest>) -> Result<Json<RetentionResponse>> {
    let probability = predict_retention(
        request.easiness_factor,
        request.repetitions,
        request.days_since_review,
    )?;
    Ok(Json(RetentionResponse { probability }))
}

/// POST /trend
pub async fn trend(Json(request): Json<TrendRequest>) -> Result<Json<TrendResult>> {
    Ok(Json(analyze_trend(&request.attempts)?))
}
