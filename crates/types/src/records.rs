//! Feedback records and the factory that stamps them

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, SecondsFormat, SubsecRound, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, LocalZone};
use crate::errors::{KioskError, Result};
use crate::satisfaction::Satisfaction;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One satisfaction answer captured by the kiosk
///
/// Records are immutable: the calendar fields are derived once, at creation,
/// from the timestamp under the local zone in effect at that moment, and are
/// never recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    id: String,
    satisfaction: Satisfaction,
    timestamp: DateTime<Utc>,
    iso: String,
    date: String,
    time: String,
    weekday_number: u8,
}

impl FeedbackRecord {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn satisfaction(&self) -> Satisfaction {
        self.satisfaction
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// RFC 3339 timestamp with millisecond precision
    pub fn iso(&self) -> &str {
        &self.iso
    }

    /// Local calendar date (`YYYY-MM-DD`) cached at creation
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Local clock time (`HH:MM:SS`) cached at creation
    pub fn time(&self) -> &str {
        &self.time
    }

    /// ISO weekday, Monday=1..Sunday=7
    pub fn weekday_number(&self) -> u8 {
        self.weekday_number
    }

    /// Whether the record was created on `day` (local calendar)
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.date == day.format(DATE_FORMAT).to_string()
    }

    /// Check that a record received from outside is internally consistent
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(KioskError::Validation("record id must not be empty".to_string()));
        }

        let parsed = DateTime::parse_from_rfc3339(&self.iso)
            .map_err(|e| KioskError::Validation(format!("invalid iso timestamp: {e}")))?;
        if parsed.with_timezone(&Utc) != self.timestamp.trunc_subsecs(3) {
            return Err(KioskError::Validation(
                "iso does not match timestamp".to_string(),
            ));
        }

        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|_| KioskError::InvalidDate(self.date.clone()))?;
        NaiveTime::parse_from_str(&self.time, TIME_FORMAT)
            .map_err(|e| KioskError::Validation(format!("invalid time '{}': {e}", self.time)))?;

        if weekday_number(date.weekday()) != self.weekday_number {
            return Err(KioskError::Validation(format!(
                "weekday {} does not match date {}",
                self.weekday_number, self.date
            )));
        }

        Ok(())
    }
}

/// Map a weekday to ISO numbering (Monday=1..Sunday=7)
///
/// Counting from Sunday=0, Sunday becomes 7 and every other day keeps its index.
pub fn weekday_number(weekday: Weekday) -> u8 {
    match weekday.num_days_from_sunday() {
        0 => 7,
        n => n as u8,
    }
}

/// Builds timestamped records from a satisfaction level
///
/// The factory owns the clock and the local zone so every record in a process
/// is derived the same way.
#[derive(Debug, Clone)]
pub struct RecordFactory {
    clock: Arc<dyn Clock>,
    zone: LocalZone,
}

impl RecordFactory {
    pub fn new(clock: Arc<dyn Clock>, zone: LocalZone) -> Self {
        Self { clock, zone }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn zone(&self) -> LocalZone {
        self.zone
    }

    /// Current local calendar date, read from the clock on every call
    pub fn today(&self) -> NaiveDate {
        self.zone.date_of(self.clock.now())
    }

    /// Create a record stamped with the current instant
    pub fn create(&self, satisfaction: Satisfaction) -> FeedbackRecord {
        self.create_at(satisfaction, self.clock.now())
    }

    /// Create a record stamped with `instant`
    pub fn create_at(&self, satisfaction: Satisfaction, instant: DateTime<Utc>) -> FeedbackRecord {
        self.build(Uuid::new_v4().to_string(), satisfaction, instant)
    }

    /// Create a record with an explicit id
    pub fn build(
        &self,
        id: impl Into<String>,
        satisfaction: Satisfaction,
        instant: DateTime<Utc>,
    ) -> FeedbackRecord {
        let timestamp = instant.trunc_subsecs(3);
        let local = self.zone.naive_local(timestamp);

        FeedbackRecord {
            id: id.into(),
            satisfaction,
            timestamp,
            iso: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            date: local.format(DATE_FORMAT).to_string(),
            time: local.format(TIME_FORMAT).to_string(),
            weekday_number: weekday_number(local.weekday()),
        }
    }
}
