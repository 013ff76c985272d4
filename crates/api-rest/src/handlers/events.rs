//! Server-sent stream of new records

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Extension,
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio::sync::watch;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tracing::{debug, warn};

use crate::auth::AdminSession;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// `GET /api/admin/events`
///
/// One `new_record` event per append made while the client is connected.
/// The stream ends when the admin session is closed, by logout, expiry or
/// server shutdown.
pub async fn events(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let closed = state
        .sessions
        .closed(&session.token)
        .ok_or(ApiError::Unauthorized)?;
    let receiver = state.store().subscribe().into_inner();

    let stream = BroadcastStream::new(receiver).filter_map(|message| match message {
        Ok(message) => match Event::default().event(message.event_type()).json_data(&message) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                warn!(error = %e, "Failed to encode record event");
                None
            }
        },
        Err(e) => {
            warn!(error = %e, "Event stream lagged, skipping missed records");
            None
        }
    });
    let stream = futures::StreamExt::take_until(stream, session_closed(closed));

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

async fn session_closed(mut closed: watch::Receiver<bool>) {
    // a dropped sender also means the session is gone
    let _ = closed.wait_for(|is_closed| *is_closed).await;
    debug!("Admin session closed, ending event stream");
}
