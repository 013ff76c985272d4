//! View selection
//!
//! Derives the record subset shown by the dashboard from a snapshot of the
//! store and the admin's [`ViewState`]. The current local date is read from the
//! clock on every call.

use chrono::NaiveDate;
use kiosk_types::{Clock, FeedbackRecord, LocalZone, RecordFactory, ViewMode, ViewState};
use std::sync::Arc;

/// Sort newest first; equal timestamps keep their relative order
pub fn sort_descending(records: &mut [FeedbackRecord]) {
    records.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
}

/// Records created on `day`, in input order
pub fn filter_by_date(records: &[FeedbackRecord], day: NaiveDate) -> Vec<FeedbackRecord> {
    records.iter().filter(|r| r.is_on(day)).cloned().collect()
}

/// Subsets for the two compared days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareSelection {
    pub day_a: NaiveDate,
    pub records_a: Vec<FeedbackRecord>,
    pub day_b: NaiveDate,
    pub records_b: Vec<FeedbackRecord>,
}

/// Result of applying a view to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSelection {
    /// Records listed in the history, newest first
    pub primary: Vec<FeedbackRecord>,
    /// Present in compare mode only
    pub compare: Option<CompareSelection>,
}

#[derive(Debug, Clone)]
pub struct ViewSelector {
    clock: Arc<dyn Clock>,
    zone: LocalZone,
}

impl ViewSelector {
    pub fn new(clock: Arc<dyn Clock>, zone: LocalZone) -> Self {
        Self { clock, zone }
    }

    /// Selector reading the same clock and zone as `factory`
    pub fn from_factory(factory: &RecordFactory) -> Self {
        Self::new(Arc::clone(factory.clock()), factory.zone())
    }

    /// Current local date
    pub fn today(&self) -> NaiveDate {
        self.zone.date_of(self.clock.now())
    }

    /// Today's records, newest first
    pub fn select_today(&self, records: &[FeedbackRecord]) -> Vec<FeedbackRecord> {
        let mut today = filter_by_date(records, self.today());
        sort_descending(&mut today);
        today
    }

    /// Apply `view` to `records` given in store order
    pub fn select(&self, records: &[FeedbackRecord], view: &ViewState) -> ViewSelection {
        let mut sorted = records.to_vec();
        sort_descending(&mut sorted);

        match view.mode() {
            ViewMode::Today => ViewSelection {
                primary: filter_by_date(&sorted, self.today()),
                compare: None,
            },
            ViewMode::Day => ViewSelection {
                primary: filter_by_date(&sorted, view.day_a()),
                compare: None,
            },
            ViewMode::Compare => {
                let compare = CompareSelection {
                    day_a: view.day_a(),
                    records_a: filter_by_date(&sorted, view.day_a()),
                    day_b: view.day_b(),
                    records_b: filter_by_date(&sorted, view.day_b()),
                };
                ViewSelection {
                    primary: sorted,
                    compare: Some(compare),
                }
            }
        }
    }
}
