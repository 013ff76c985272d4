//! CSV and tab-delimited exports of the full record set
//!
//! Both formats list every record newest first and use the calendar fields
//! cached on the record at creation.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use kiosk_types::{FeedbackRecord, KioskError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{ProcessorError, Result};
use crate::selection::sort_descending;

/// CSV header line
pub const CSV_HEADER: &str = "id,satisfaction,date,time,weekdayNumber,iso";

/// Default export file name prefix
pub const DEFAULT_FILE_PREFIX: &str = "kiosk_feedback";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Txt,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Txt => "text/plain; charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = KioskError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "txt" => Ok(ExportFormat::Txt),
            other => Err(KioskError::Validation(format!("unknown export format '{other}'"))),
        }
    }
}

/// A rendered export ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct Exporter {
    prefix: String,
}

impl Exporter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `<prefix>_<YYYY-MM-DD>.<ext>`
    pub fn filename(&self, format: ExportFormat, date: NaiveDate) -> String {
        format!("{}_{}.{}", self.prefix, date.format("%Y-%m-%d"), format.extension())
    }

    /// Render `records` (any order) as of the local date `date`
    pub fn export(
        &self,
        format: ExportFormat,
        records: &[FeedbackRecord],
        date: NaiveDate,
    ) -> Result<ExportArtifact> {
        let mut sorted = records.to_vec();
        sort_descending(&mut sorted);

        let body = match format {
            ExportFormat::Csv => to_csv(&sorted)?,
            ExportFormat::Txt => to_txt(&sorted),
        };

        let filename = self.filename(format, date);
        debug!(filename = %filename, records = sorted.len(), "Rendered export");

        Ok(ExportArtifact {
            filename,
            content_type: format.content_type(),
            body,
        })
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_PREFIX)
    }
}

/// Header plus one fully quoted row per record, joined by `\n`
pub fn to_csv(records: &[FeedbackRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        let weekday = record.weekday_number().to_string();
        writer.write_record([
            record.id(),
            record.satisfaction().as_str(),
            record.date(),
            record.time(),
            weekday.as_str(),
            record.iso(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ProcessorError::Export(e.to_string()))?;
    let rows = String::from_utf8(bytes).map_err(|e| ProcessorError::Export(e.to_string()))?;

    let mut out = String::with_capacity(CSV_HEADER.len() + rows.len() + 1);
    out.push_str(CSV_HEADER);
    if !rows.is_empty() {
        out.push('\n');
        out.push_str(rows.strip_suffix('\n').unwrap_or(&rows));
    }
    Ok(out)
}

/// One tab-separated line per record: id, satisfaction, date, time, weekday
pub fn to_txt(records: &[FeedbackRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                r.id(),
                r.satisfaction(),
                r.date(),
                r.time(),
                r.weekday_number()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
