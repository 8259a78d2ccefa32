//! Schedule endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use review_core::schedule;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /schedule
pub async fn build(
    State(state): State<AppState>,
    Json(request): Json<BuildScheduleRequest>,
) -> Result<Json<Vec<ReviewSchedule>>> {
    for item in &request.states {
        item.validate()?;
    }

    let now = Utc::now();
    let built = schedule::build_schedule(&request.states, &request.mastery_by_item, &request.titles, now);

    if let Some(learner_id) = request.learner_id {
        tracing::debug!(%learner_id, entries = built.len(), "Caching schedule");
        state.schedules.write().await.insert(learner_id, built.clone(), now);
    }

    Ok(Json(built))
}

/// GET /schedule/due-today
pub async fn due_today(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>> {
    filter_cached(&state, &query.learner_id, schedule::due_today).await
}

/// GET /schedule/due-this-week
pub async fn due_this_week(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>> {
    filter_cached(&state, &query.learner_id, schedule::due_this_week).await
}

async fn filter_cached(
    state: &AppState,
    learner_id: &str,
    filter: fn(&[ReviewSchedule], chrono::DateTime<Utc>) -> Vec<ReviewSchedule>,
) -> Result<Json<ScheduleResponse>> {
    let cache = state.schedules.read().await;
    let cached = cache
        .get(&learner_id.to_string())
        .ok_or_else(|| ApiError::NotFound(format!("No schedule built for learner {}", learner_id)))?;

    let now = Utc::now();
    let current = schedule::refresh_schedule(&cached.entries, now);

    Ok(Json(ScheduleResponse {
        schedule: filter(&current, now),
        built_at: cached.built_at,
    }))
}
