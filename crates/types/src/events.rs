//! Messages broadcast between the kiosk and administrative surfaces

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::records::FeedbackRecord;

/// Notification carried on the intake channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KioskMessage {
    /// A record was appended to the store
    NewRecord { record: FeedbackRecord },
}

impl KioskMessage {
    pub fn new_record(record: FeedbackRecord) -> Self {
        KioskMessage::NewRecord { record }
    }

    /// Get event type as string
    pub fn event_type(&self) -> &'static str {
        match self {
            KioskMessage::NewRecord { .. } => "new_record",
        }
    }

    pub fn record(&self) -> &FeedbackRecord {
        match self {
            KioskMessage::NewRecord { record } => record,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a message received at a subscriber boundary
    pub fn from_json(payload: &str) -> Result<Self> {
        let message: KioskMessage = serde_json::from_str(payload)?;
        message.record().validate()?;
        Ok(message)
    }
}
