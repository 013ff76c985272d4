//! Server bootstrap

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use crate::auth::SessionStore;
use crate::error::ServerError;
use crate::routes::create_router;
use crate::state::AppState;

/// How often idle admin sessions are swept
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Bind the configured address and serve until a shutdown signal arrives
///
/// Shutdown closes every admin session, which ends open event streams so
/// graceful shutdown does not wait on them.
pub async fn serve(state: AppState) -> Result<(), ServerError> {
    let address = state.config.service.bind_address();
    let service = state.config.service.name.clone();
    let sessions = state.sessions.clone();
    let app = create_router(state);

    info!(address = %address, "Binding kiosk server");
    let listener = TcpListener::bind(&address).await?;
    info!(address = %address, service = %service, "Kiosk server running");

    let sweeper = tokio::spawn(sweep_sessions(sessions.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            sessions.close_all();
        })
        .await?;

    sweeper.abort();

    info!("Kiosk server shut down");
    Ok(())
}

async fn sweep_sessions(sessions: Arc<SessionStore>) {
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        sessions.prune_expired();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
