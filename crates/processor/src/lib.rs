//! Reporting engine for the satisfaction kiosk
//!
//! This crate turns a snapshot of the record store into what the
//! administrative surface shows: per-level counts and percentages, the
//! today/day/compare views, paginated history, chart configuration and the
//! CSV/TXT exports. Every operation here is synchronous and pure.

pub mod aggregation;
pub mod chart;
pub mod error;
pub mod export;
pub mod pagination;
pub mod report;
pub mod selection;

pub use aggregation::{
    counts_for, percent, SatisfactionCounter, SatisfactionCounts,
    SatisfactionPercentages,
};

pub use chart::{bar_chart, doughnut_chart, ChartData, ChartDataset, ChartOptions, ChartSet};

pub use error::{ProcessorError, Result as ProcessorResult};

pub use export::{ExportArtifact, ExportFormat, Exporter, CSV_HEADER, DEFAULT_FILE_PREFIX};

pub use pagination::{Page, Paginator, DEFAULT_PAGE_SIZE};

pub use report::{CompareReport, DashboardReport, DayStats, ReportBuilder};

pub use selection::{filter_by_date, sort_descending, CompareSelection, ViewSelection, ViewSelector};
