//! Bearer token gate for admin routes

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::state::AppState;

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Reject requests without a live admin session, refreshing the one presented
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request)
        .filter(|token| state.sessions.touch(token))
        .map(str::to_string)
        .ok_or(ApiError::Unauthorized)?;

    request.extensions_mut().insert(AdminSession { token });
    Ok(next.run(request).await)
}
