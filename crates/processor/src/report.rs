//! Dashboard report assembly
//!
//! Combines view selection, aggregation, pagination and charts into the single
//! document rendered by the administrative dashboard.

use chrono::NaiveDate;
use kiosk_types::{FeedbackRecord, RecordFactory, ViewState};
use serde::{Deserialize, Serialize};

use crate::aggregation::{counts_for, SatisfactionCounts, SatisfactionPercentages};
use crate::chart::ChartSet;
use crate::error::Result;
use crate::pagination::{Page, Paginator};
use crate::selection::{filter_by_date, ViewSelector};

/// Counts for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayStats {
    pub date: NaiveDate,
    pub total: u64,
    pub counts: SatisfactionCounts,
    pub percentages: SatisfactionPercentages,
}

impl DayStats {
    pub fn for_records(date: NaiveDate, records: &[FeedbackRecord]) -> Self {
        let counts = counts_for(records);
        Self {
            date,
            total: counts.total(),
            counts,
            percentages: counts.percentages(),
        }
    }
}

/// Side-by-side statistics for two days
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompareReport {
    pub day_a: DayStats,
    pub day_b: DayStats,
}

/// Everything the dashboard shows for one view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardReport {
    /// View after page clamping
    pub view: ViewState,
    /// Records in the store
    pub total_records: u64,
    /// Records in the selected view
    pub total_filtered: u64,
    /// Counts over the selected view
    pub counts: SatisfactionCounts,
    pub percentages: SatisfactionPercentages,
    /// Current local date statistics, independent of the view
    pub today: DayStats,
    /// History page of the selected view, newest first
    pub page: Page<FeedbackRecord>,
    pub charts: ChartSet,
    /// Present in compare mode only
    pub compare: Option<CompareReport>,
}

#[derive(Debug, Clone)]
pub struct ReportBuilder {
    selector: ViewSelector,
    paginator: Paginator,
}

impl ReportBuilder {
    pub fn new(selector: ViewSelector, paginator: Paginator) -> Self {
        Self {
            selector,
            paginator,
        }
    }

    /// Builder sharing the clock and zone of `factory`
    pub fn for_factory(factory: &RecordFactory, page_size: usize) -> Result<Self> {
        Ok(Self::new(
            ViewSelector::from_factory(factory),
            Paginator::new(page_size)?,
        ))
    }

    pub fn selector(&self) -> &ViewSelector {
        &self.selector
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Build the report for `records` (store order) and clamp the view's page
    pub fn build(&self, records: &[FeedbackRecord], view: &mut ViewState) -> DashboardReport {
        let selection = self.selector.select(records, view);

        let total_pages = self.paginator.total_pages(selection.primary.len());
        view.set_page(view.page(), total_pages);
        let page = self.paginator.page(&selection.primary, view.page());

        let counts = counts_for(&selection.primary);
        let today = self.selector.today();
        let today_stats = DayStats::for_records(today, &filter_by_date(records, today));

        let compare = selection.compare.map(|c| CompareReport {
            day_a: DayStats::for_records(c.day_a, &c.records_a),
            day_b: DayStats::for_records(c.day_b, &c.records_b),
        });

        DashboardReport {
            view: view.clone(),
            total_records: records.len() as u64,
            total_filtered: selection.primary.len() as u64,
            counts,
            percentages: counts.percentages(),
            today: today_stats,
            page,
            charts: ChartSet::from_counts(&counts),
            compare,
        }
    }
}
