//! Error types for the kiosk domain

use thiserror::Error;

/// Result type alias for kiosk domain operations
pub type Result<T> = std::result::Result<T, KioskError>;

/// Main error type for the kiosk domain
#[derive(Error, Debug)]
pub enum KioskError {
    #[error("Unknown satisfaction level: {0}")]
    UnknownSatisfaction(String),

    #[error("Unknown view mode: {0}")]
    UnknownViewMode(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
