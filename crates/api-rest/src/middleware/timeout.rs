//! Request timeout

use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Layer answering 408 when a request exceeds `duration`
pub fn create_timeout_layer(duration: Duration) -> TimeoutLayer {
    TimeoutLayer::new(duration)
}
