//! Administrative surface models

use kiosk_types::{parse_day, ViewMode, ViewState};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiResult;

/// Login with the shared admin secret
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(max = 256))]
    pub password: String,
}

/// Bearer token for the opened session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
}

/// Dashboard view changes; absent fields keep the session's current value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DashboardQuery {
    /// `today`, `day` or `compare`
    pub mode: Option<String>,
    /// `YYYY-MM-DD`
    pub day_a: Option<String>,
    /// `YYYY-MM-DD`
    pub day_b: Option<String>,
    /// 1-based history page
    #[validate(range(min = 1))]
    pub page: Option<usize>,
}

impl DashboardQuery {
    /// Apply the query to `view`
    ///
    /// Mode and days are applied before the page, so a page requested together
    /// with a new mode or day is honored.
    pub fn apply(&self, view: &mut ViewState) -> ApiResult<()> {
        self.validate()?;

        if let Some(mode) = &self.mode {
            view.set_mode(mode.parse::<ViewMode>()?);
        }
        if let Some(day) = &self.day_a {
            view.set_day_a(parse_day(day)?);
        }
        if let Some(day) = &self.day_b {
            view.set_day_b(parse_day(day)?);
        }
        if let Some(page) = self.page {
            // clamped against the real page count when the report is built
            view.set_page(page, usize::MAX);
        }

        Ok(())
    }
}
