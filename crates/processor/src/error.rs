//! Error types for the reporting engine

use kiosk_types::KioskError;
use thiserror::Error;

/// Main processor error type
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// CSV encoding errors
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Export assembly errors
    #[error("export error: {0}")]
    Export(String),

    /// Invalid view or record input
    #[error(transparent)]
    Kiosk(#[from] KioskError),
}

/// Result type for processor operations
pub type Result<T> = std::result::Result<T, ProcessorError>;
