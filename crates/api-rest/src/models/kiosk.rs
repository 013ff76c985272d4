//! Kiosk surface models

use kiosk_types::Satisfaction;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiResult;

/// Request to record one satisfaction answer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitFeedbackRequest {
    /// Wire name of the chosen level
    #[validate(length(min = 1, max = 64))]
    pub satisfaction: String,
}

impl SubmitFeedbackRequest {
    pub fn new(satisfaction: Satisfaction) -> Self {
        Self {
            satisfaction: satisfaction.as_str().to_string(),
        }
    }

    /// Validate and parse the requested level
    pub fn level(&self) -> ApiResult<Satisfaction> {
        self.validate()?;
        Ok(self.satisfaction.parse()?)
    }
}
