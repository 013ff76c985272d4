//! API error types and their HTTP mapping

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use collector::{BuildError, SubmitError};
use kiosk_types::KioskError;
use processor::ProcessorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Message shown for a wrong admin password
pub const INVALID_PASSWORD_MESSAGE: &str = "Password incorreta";

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine readable error code
    pub error: String,
    /// Human readable message
    pub message: String,
    /// Milliseconds until a locked kiosk accepts submissions again
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_ms: Option<u64>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            retry_after_ms: None,
        }
    }
}

/// Handler error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("{}", INVALID_PASSWORD_MESSAGE)]
    InvalidCredentials,

    #[error("missing or unknown admin session")]
    Unauthorized,

    #[error("kiosk locked, retry after {retry_after:?}")]
    Locked { retry_after: Duration },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Locked { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::BadRequest(message) => ErrorResponse::new("bad_request", message.clone()),
            ApiError::InvalidCredentials => {
                ErrorResponse::new("invalid_credentials", INVALID_PASSWORD_MESSAGE)
            }
            ApiError::Unauthorized => {
                ErrorResponse::new("unauthorized", "Missing or unknown admin session")
            }
            ApiError::Locked { retry_after } => ErrorResponse {
                retry_after_ms: Some(retry_after.as_millis() as u64),
                ..ErrorResponse::new("locked", "Kiosk is locked, try again shortly")
            },
            ApiError::Internal(_) => {
                ErrorResponse::new("internal_error", "An unexpected error occurred")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Request failed");
        }

        let mut response = (self.status(), Json(self.body())).into_response();

        if let ApiError::Locked { retry_after } = &self {
            let seconds = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            if let Ok(value) = HeaderValue::from_str(&seconds.max(1).to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

impl From<KioskError> for ApiError {
    fn from(err: KioskError) -> Self {
        match err {
            KioskError::Serialization(e) => ApiError::Internal(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Locked { retry_after } => ApiError::Locked { retry_after },
            SubmitError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ProcessorError> for ApiError {
    fn from(err: ProcessorError) -> Self {
        match err {
            ProcessorError::Kiosk(e) => e.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Server startup errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BuildError> for ServerError {
    fn from(err: BuildError) -> Self {
        ServerError::Configuration(err.to_string())
    }
}

impl From<ProcessorError> for ServerError {
    fn from(err: ProcessorError) -> Self {
        ServerError::Configuration(err.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Locked {
                retry_after: Duration::from_millis(1500)
            }
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_locked_response_headers() {
        let response = ApiError::Locked {
            retry_after: Duration::from_millis(1500),
        }
        .into_response();
        assert_eq!(response.headers()[header::RETRY_AFTER], "2");
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let body = ApiError::Internal("lock poisoned".into()).body();
        assert_eq!(body.error, "internal_error");
        assert!(!body.message.contains("poisoned"));
    }

    #[test]
    fn test_kiosk_errors_are_bad_requests() {
        let err: ApiError = KioskError::UnknownSatisfaction("meh".into()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
