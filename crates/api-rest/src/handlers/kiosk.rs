//! Kiosk surface: submit an answer, read the header counters

use axum::{extract::State, http::StatusCode, Json};
use collector::KioskSummary;
use kiosk_types::FeedbackRecord;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::models::SubmitFeedbackRequest;
use crate::state::AppState;

/// `POST /api/kiosk/feedback`
pub async fn submit_feedback(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitFeedbackRequest>,
) -> ApiResult<(StatusCode, Json<FeedbackRecord>)> {
    let level = request.level()?;
    let record = state.collector.submit(level)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/kiosk/summary`
pub async fn summary(State(state): State<AppState>) -> Json<KioskSummary> {
    Json(state.collector.summary())
}
