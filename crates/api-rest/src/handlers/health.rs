use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::state::AppState;

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(
        state.config.service.name.clone(),
        state.store().len(),
        state.collector.factory().clock().now(),
    ))
}
