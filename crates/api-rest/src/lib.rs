//! HTTP surfaces for the satisfaction kiosk
//!
//! Two surfaces share one in-process record store: the kiosk, which records
//! answers and shows its counters, and the bearer-gated admin dashboard with
//! exports and a live stream of new records.

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::{AdminSession, Authenticator, SessionStore, SharedSecretAuthenticator};
pub use error::{ApiError, ApiResult, ErrorResponse, ServerError, INVALID_PASSWORD_MESSAGE};
pub use extract::{ApiJson, ApiQuery};
pub use models::{DashboardQuery, HealthResponse, LoginRequest, LoginResponse, SubmitFeedbackRequest};
pub use routes::create_router;
pub use server::serve;
pub use state::AppState;
