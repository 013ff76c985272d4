//! Satisfaction kiosk CLI
//!
//! Runs the server and talks to a running one over HTTP.

pub mod client;
pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use client::{ClientConfig, ExportDownload, RestClient};
pub use output::{get_formatter, Formatter, OutputFormat};

/// Default server address
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Error, Debug)]
pub enum CliError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Kiosk(#[from] kiosk_types::KioskError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("server error: {0}")]
    Server(#[from] kiosk_api_rest::ServerError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid export filename: {0:?}")]
    InvalidFilename(String),
}

impl From<kiosk_config::ConfigError> for CliError {
    fn from(err: kiosk_config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;

/// Write an export body to `dir/filename`, creating `dir` if needed
///
/// The filename comes from the server, so only a bare file name is accepted.
pub fn write_export(dir: &Path, filename: &str, body: &str) -> CliResult<PathBuf> {
    let bare = Path::new(filename).file_name().and_then(|name| name.to_str());
    if filename.is_empty() || bare != Some(filename) {
        return Err(CliError::InvalidFilename(filename.to_string()));
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, body)?;
    tracing::debug!(path = %path.display(), bytes = body.len(), "Export written");
    Ok(path)
}
