//! Common models shared across surfaces

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// Records currently held in memory
    pub records: usize,
    /// Server time
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok(service: impl Into<String>, records: usize, timestamp: DateTime<Utc>) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            records,
            timestamp,
        }
    }
}
