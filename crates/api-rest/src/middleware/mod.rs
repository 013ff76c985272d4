//! HTTP middleware

pub mod auth;
pub mod cache;
pub mod logging;
pub mod panic;
pub mod timeout;

pub use auth::{bearer_token, require_admin};
pub use cache::no_store_middleware;
pub use logging::{logging_middleware, request_id_middleware, RequestId, Surface, REQUEST_ID_HEADER};
pub use panic::catch_panic_layer;
pub use timeout::{create_timeout_layer, DEFAULT_TIMEOUT};
