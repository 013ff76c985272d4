//! Router assembly

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use std::time::Duration;

use crate::handlers::{admin, events, health, kiosk};
use crate::middleware::{
    catch_panic_layer, create_timeout_layer, logging_middleware, no_store_middleware,
    request_id_middleware, require_admin,
};
use crate::state::AppState;

/// Full application router
pub fn create_router(state: AppState) -> Router {
    let timeout = state.config.service.request_timeout();

    let kiosk = Router::new()
        .route("/feedback", post(kiosk::submit_feedback))
        .route("/summary", get(kiosk::summary));

    let admin_protected = Router::new()
        .route("/logout", post(admin::logout))
        .route("/dashboard", get(admin::dashboard))
        .route("/export/:format", get(admin::export))
        .route("/events", get(events::events))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    let admin = Router::new()
        .route("/login", post(admin::login))
        .merge(admin_protected)
        .layer(from_fn(no_store_middleware));

    let router = Router::new()
        .route("/health", get(health::health))
        .nest("/api/kiosk", kiosk)
        .nest("/api/admin", admin);

    with_middleware(router, timeout).with_state(state)
}

/// Common layers: panic recovery, timeout, access log and request id
pub fn with_middleware<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(catch_panic_layer())
        .layer(create_timeout_layer(timeout))
        .layer(from_fn(logging_middleware))
        .layer(from_fn(request_id_middleware))
}
