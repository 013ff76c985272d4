//! Administrative surface: login, dashboard and exports

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use processor::{DashboardReport, ExportFormat};
use tracing::{info, warn};

use crate::auth::AdminSession;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::models::{DashboardQuery, LoginRequest, LoginResponse};
use crate::state::AppState;

/// `POST /api/admin/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    validator::Validate::validate(&request)?;

    if !state.authenticator.verify(&request.password) {
        warn!("Admin login rejected");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.sessions.create(state.collector.factory().today());
    info!(sessions = state.sessions.len(), "Admin session opened");
    Ok(Json(LoginResponse { token }))
}

/// `POST /api/admin/logout`
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> StatusCode {
    state.sessions.remove(&session.token);
    info!(sessions = state.sessions.len(), "Admin session closed");
    StatusCode::NO_CONTENT
}

/// `GET /api/admin/dashboard`
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> ApiResult<Json<DashboardReport>> {
    let today = state.collector.factory().today();
    let mut view = state
        .sessions
        .view(&session.token)
        .ok_or(ApiError::Unauthorized)?;

    query.apply(&mut view)?;
    let report = state.reports.build(&state.store().all(), &mut view);
    state.sessions.update(&session.token, view);

    tracing::debug!(
        mode = %report.view.mode(),
        today = %today,
        filtered = report.total_filtered,
        page = report.page.page,
        "Dashboard built"
    );

    Ok(Json(report))
}

/// `GET /api/admin/export/:format`
pub async fn export(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> ApiResult<Response> {
    let format: ExportFormat = format.parse()?;
    let today = state.collector.factory().today();
    let artifact = state.exporter.export(format, &state.store().all(), today)?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        artifact.filename
    ))
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    info!(filename = %artifact.filename, bytes = artifact.body.len(), "Export generated");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(artifact.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.body,
    )
        .into_response())
}
