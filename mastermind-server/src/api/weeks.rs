use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::{ApiError, ApiResult},
    db::repositories::WeekRepository,
    state::AppState,
    views,
};
use mastermind_types::{CalendarView, GenerateWeekResponse, WeekSummary};

/// POST /generate-week - Generate and store the next week of content
pub async fn generate_week(State(state): State<AppState>) -> ApiResult<Json<GenerateWeekResponse>> {
    let mut rng = state.fork_rng()?;
    let response = state.week_service().generate_next_week(Utc::now(), &mut rng)?;
    Ok(Json(response))
}

/// GET /weeks - All generated weeks, newest first
pub async fn list_weeks(State(state): State<AppState>) -> ApiResult<Json<Vec<WeekSummary>>> {
    let week_repo = WeekRepository::new(state.db.pool.clone());
    let weeks = week_repo
        .list()
        .map_err(|e| ApiError::InternalError(format!("Failed to list weeks: {}", e)))?;

    Ok(Json(weeks.iter().map(WeekSummary::from).collect()))
}

/// GET /calendar - Calendar of the latest week
pub async fn latest_calendar(State(state): State<AppState>) -> ApiResult<Json<CalendarView>> {
    Ok(Json(views::latest_calendar(&state.db)?))
}

/// GET /weeks/:id/calendar - Calendar of one week
pub async fn week_calendar(
    State(state): State<AppState>,
    Path(week_id): Path<String>,
) -> ApiResult<Json<CalendarView>> {
    let week_id = Uuid::parse_str(&week_id)
        .map_err(|_| ApiError::BadRequest(format!("Invalid week id: {}", week_id)))?;

    views::week_calendar(&state.db, &week_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Week {} not found", week_id)))
}
