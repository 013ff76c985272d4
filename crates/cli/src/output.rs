//! Output formatting

use clap::ValueEnum;
use collector::KioskSummary;
use colored::Colorize;
use kiosk_api_rest::HealthResponse;
use kiosk_types::{FeedbackRecord, Satisfaction};
use processor::{DashboardReport, DayStats, SatisfactionCounts, SatisfactionPercentages};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::CliResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Renders command results for the terminal
pub trait Formatter {
    fn health(&self, health: &HealthResponse) -> CliResult<String>;
    fn record(&self, record: &FeedbackRecord) -> CliResult<String>;
    fn summary(&self, summary: &KioskSummary) -> CliResult<String>;
    fn dashboard(&self, report: &DashboardReport) -> CliResult<String>;
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn health(&self, health: &HealthResponse) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(health)?)
    }

    fn record(&self, record: &FeedbackRecord) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(record)?)
    }

    fn summary(&self, summary: &KioskSummary) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(summary)?)
    }

    fn dashboard(&self, report: &DashboardReport) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

pub struct TableFormatter;

impl TableFormatter {
    fn level(level: Satisfaction) -> String {
        let title = format!("{} {}", level.emoji(), level.title());
        match level {
            Satisfaction::VerySatisfied => title.green().to_string(),
            Satisfaction::Satisfied => title.cyan().to_string(),
            Satisfaction::Unsatisfied => title.red().to_string(),
        }
    }

    fn breakdown(out: &mut String, counts: &SatisfactionCounts, percentages: &SatisfactionPercentages) {
        for level in Satisfaction::ALL {
            let _ = writeln!(
                out,
                "  {:<24} {:>6} {:>5}%",
                level.title(),
                counts.get(level),
                percentages.get(level)
            );
        }
    }

    fn day(out: &mut String, label: &str, stats: &DayStats) {
        let _ = writeln!(
            out,
            "{} {} ({} records)",
            label.bold().cyan(),
            stats.date,
            stats.total
        );
        Self::breakdown(out, &stats.counts, &stats.percentages);
    }
}

impl Formatter for TableFormatter {
    fn health(&self, health: &HealthResponse) -> CliResult<String> {
        Ok(format!(
            "{} {} v{} ({} records, server time {})",
            "✓".green(),
            health.service.bold(),
            health.version,
            health.records,
            health.timestamp.to_rfc3339()
        ))
    }

    fn record(&self, record: &FeedbackRecord) -> CliResult<String> {
        Ok(format!(
            "{} {} {} {}",
            record.date(),
            record.time(),
            Self::level(record.satisfaction()),
            record.id().dimmed()
        ))
    }

    fn summary(&self, summary: &KioskSummary) -> CliResult<String> {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "Kiosk".bold().cyan());
        let _ = writeln!(out, "  Total:  {}", summary.total);
        let _ = writeln!(out, "  Today:  {}", summary.today);
        let state = if summary.locked {
            "locked".yellow()
        } else {
            "ready".green()
        };
        let _ = writeln!(out, "  State:  {state}");
        if let Some(notice) = &summary.notice {
            let _ = writeln!(
                out,
                "  Notice: {} {} ({})",
                notice.emoji, notice.message, notice.title
            );
        }
        Ok(out.trim_end().to_string())
    }

    fn dashboard(&self, report: &DashboardReport) -> CliResult<String> {
        let mut out = String::new();
        let view = &report.view;

        let _ = writeln!(
            out,
            "{} {} ({} of {} records)",
            "View:".bold().cyan(),
            view.mode(),
            report.total_filtered,
            report.total_records
        );
        Self::breakdown(&mut out, &report.counts, &report.percentages);
        let _ = writeln!(out);
        Self::day(&mut out, "Today", &report.today);

        if let Some(compare) = &report.compare {
            let _ = writeln!(out);
            Self::day(&mut out, "Day A", &compare.day_a);
            let _ = writeln!(out);
            Self::day(&mut out, "Day B", &compare.day_b);
        }

        let _ = writeln!(out);
        let page = &report.page;
        if page.items.is_empty() {
            let _ = writeln!(out, "{}", "No records".dimmed());
        }
        for record in &page.items {
            let _ = writeln!(out, "  {}", self.record(record)?);
        }
        let _ = writeln!(
            out,
            "{}",
            format!("Page {}/{} ({} records)", page.page, page.total_pages, page.total).dimmed()
        );

        Ok(out.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kiosk_types::{LocalZone, ManualClock, RecordFactory, ViewState};
    use processor::ReportBuilder;
    use std::sync::Arc;

    fn factory() -> RecordFactory {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 7, 1, 15, 0, 0).unwrap(),
        ));
        RecordFactory::new(clock, LocalZone::utc())
    }

    fn report(records: &[FeedbackRecord]) -> DashboardReport {
        let factory = factory();
        let builder = ReportBuilder::for_factory(&factory, 20).unwrap();
        builder.build(records, &mut ViewState::new(factory.today()))
    }

    #[test]
    fn test_json_dashboard_round_trips() {
        let factory = factory();
        let records = vec![factory.create(Satisfaction::Satisfied)];
        let report = report(&records);

        let text = JsonFormatter.dashboard(&report).unwrap();
        let parsed: DashboardReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_table_dashboard_lists_page() {
        colored::control::set_override(false);
        let factory = factory();
        let records = vec![
            factory.create(Satisfaction::VerySatisfied),
            factory.create(Satisfaction::Unsatisfied),
        ];

        let text = TableFormatter.dashboard(&report(&records)).unwrap();
        assert!(text.contains("View: today (2 of 2 records)"));
        assert!(text.contains("Muito satisfeito"));
        assert!(text.contains(records[0].id()));
        assert!(text.ends_with("Page 1/1 (2 records)"));
    }

    #[test]
    fn test_table_dashboard_empty() {
        colored::control::set_override(false);
        let text = TableFormatter.dashboard(&report(&[])).unwrap();
        assert!(text.contains("No records"));
        assert!(text.contains("Page 1/1 (0 records)"));
    }
}
