//! Administrative view state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{KioskError, Result};
use crate::records::DATE_FORMAT;

/// Which subset of records the dashboard shows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Records created on the current local date
    #[default]
    Today,
    /// Records created on one selected date
    Day,
    /// Two selected dates side by side
    Compare,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Today => "today",
            ViewMode::Day => "day",
            ViewMode::Compare => "compare",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = KioskError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "today" => Ok(ViewMode::Today),
            "day" => Ok(ViewMode::Day),
            "compare" => Ok(ViewMode::Compare),
            other => Err(KioskError::UnknownViewMode(other.to_string())),
        }
    }
}

/// Parse a `YYYY-MM-DD` day selection
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| KioskError::InvalidDate(value.to_string()))
}

/// Selection held by one admin session
///
/// Changing the mode or either selected day sends the history back to page 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewState {
    mode: ViewMode,
    day_a: NaiveDate,
    day_b: NaiveDate,
    page: usize,
}

impl ViewState {
    /// Fresh view: today's records, both days set to `today`, first page
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: ViewMode::Today,
            day_a: today,
            day_b: today,
            page: 1,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn day_a(&self) -> NaiveDate {
        self.day_a
    }

    pub fn day_b(&self) -> NaiveDate {
        self.day_b
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            self.mode = mode;
            self.page = 1;
        }
    }

    pub fn set_day_a(&mut self, day: NaiveDate) {
        if self.day_a != day {
            self.day_a = day;
            self.page = 1;
        }
    }

    pub fn set_day_b(&mut self, day: NaiveDate) {
        if self.day_b != day {
            self.day_b = day;
            self.page = 1;
        }
    }

    /// Move to `page`, clamped into `1..=total_pages`
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }
}
