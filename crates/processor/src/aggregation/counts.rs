use super::percent::percent;

use kiosk_types::{FeedbackRecord, Satisfaction};
use serde::{Deserialize, Serialize};

/// Number of records per satisfaction level
///
/// All three levels are always present, keyed by their wire names.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SatisfactionCounts {
    #[serde(rename = "muito_satisfeito")]
    pub very_satisfied: u64,
    #[serde(rename = "satisfeito")]
    pub satisfied: u64,
    #[serde(rename = "insatisfeito")]
    pub unsatisfied: u64,
}

impl SatisfactionCounts {
    pub fn get(&self, level: Satisfaction) -> u64 {
        match level {
            Satisfaction::VerySatisfied => self.very_satisfied,
            Satisfaction::Satisfied => self.satisfied,
            Satisfaction::Unsatisfied => self.unsatisfied,
        }
    }

    pub fn increment(&mut self, level: Satisfaction) {
        match level {
            Satisfaction::VerySatisfied => self.very_satisfied += 1,
            Satisfaction::Satisfied => self.satisfied += 1,
            Satisfaction::Unsatisfied => self.unsatisfied += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.very_satisfied + self.satisfied + self.unsatisfied
    }

    /// Counts in display order
    pub fn as_array(&self) -> [u64; 3] {
        Satisfaction::ALL.map(|level| self.get(level))
    }

    /// Share of each level in the total
    pub fn percentages(&self) -> SatisfactionPercentages {
        let total = self.total();
        SatisfactionPercentages {
            very_satisfied: percent(self.very_satisfied, total),
            satisfied: percent(self.satisfied, total),
            unsatisfied: percent(self.unsatisfied, total),
        }
    }
}

/// Whole-number share of each level
///
/// Each value is rounded independently, so the three need not sum to 100.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SatisfactionPercentages {
    #[serde(rename = "muito_satisfeito")]
    pub very_satisfied: u32,
    #[serde(rename = "satisfeito")]
    pub satisfied: u32,
    #[serde(rename = "insatisfeito")]
    pub unsatisfied: u32,
}

impl SatisfactionPercentages {
    pub fn get(&self, level: Satisfaction) -> u32 {
        match level {
            Satisfaction::VerySatisfied => self.very_satisfied,
            Satisfaction::Satisfied => self.satisfied,
            Satisfaction::Unsatisfied => self.unsatisfied,
        }
    }
}

/// Counts satisfaction levels
///
/// Partial counters can be merged, so a subset can be counted once and folded
/// into a larger total.
///
/// # Examples
///
/// ```
/// use kiosk_types::Satisfaction;
/// use processor::aggregation::SatisfactionCounter;
///
/// let mut counter = SatisfactionCounter::new();
/// counter.update(Satisfaction::Satisfied);
/// counter.update(Satisfaction::Unsatisfied);
///
/// let counts = counter.counts();
/// assert_eq!(counts.satisfied, 1);
/// assert_eq!(counts.total(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SatisfactionCounter {
    counts: SatisfactionCounts,
}

impl SatisfactionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one answer
    pub fn update(&mut self, value: Satisfaction) {
        self.counts.increment(value);
    }

    /// Fold the counts of another counter into this one
    pub fn merge(&mut self, other: SatisfactionCounts) {
        self.counts.very_satisfied += other.very_satisfied;
        self.counts.satisfied += other.satisfied;
        self.counts.unsatisfied += other.unsatisfied;
    }

    pub fn counts(&self) -> SatisfactionCounts {
        self.counts
    }

    pub fn reset(&mut self) {
        self.counts = SatisfactionCounts::default();
    }

    /// Answers counted so far
    pub fn count(&self) -> u64 {
        self.counts.total()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl Extend<Satisfaction> for SatisfactionCounter {
    fn extend<I: IntoIterator<Item = Satisfaction>>(&mut self, iter: I) {
        for value in iter {
            self.update(value);
        }
    }
}

impl FromIterator<Satisfaction> for SatisfactionCounter {
    fn from_iter<I: IntoIterator<Item = Satisfaction>>(iter: I) -> Self {
        let mut counter = Self::new();
        counter.extend(iter);
        counter
    }
}

/// Count the satisfaction levels of `records`
pub fn counts_for(records: &[FeedbackRecord]) -> SatisfactionCounts {
    records
        .iter()
        .map(FeedbackRecord::satisfaction)
        .collect::<SatisfactionCounter>()
        .counts()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kiosk_types::{LocalZone, ManualClock, RecordFactory};
    use std::sync::Arc;

    fn records(levels: &[Satisfaction]) -> Vec<FeedbackRecord> {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 4, 20, 11, 0, 0).unwrap(),
        ));
        let factory = RecordFactory::new(clock, LocalZone::utc());
        levels.iter().map(|level| factory.create(*level)).collect()
    }

    #[test]
    fn test_counts_for_empty() {
        let counts = counts_for(&[]);
        assert_eq!(counts, SatisfactionCounts::default());
        assert_eq!(counts.total(), 0);

        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["muito_satisfeito"], 0);
        assert_eq!(json["satisfeito"], 0);
        assert_eq!(json["insatisfeito"], 0);
    }

    #[test]
    fn test_counts_sum_to_len() {
        let levels = [
            Satisfaction::VerySatisfied,
            Satisfaction::Unsatisfied,
            Satisfaction::VerySatisfied,
            Satisfaction::Satisfied,
            Satisfaction::VerySatisfied,
        ];
        let counts = counts_for(&records(&levels));

        assert_eq!(counts.very_satisfied, 3);
        assert_eq!(counts.satisfied, 1);
        assert_eq!(counts.unsatisfied, 1);
        assert_eq!(counts.total(), levels.len() as u64);
        assert_eq!(counts.as_array(), [3, 1, 1]);
    }

    #[test]
    fn test_percentages() {
        let counts = SatisfactionCounts {
            very_satisfied: 1,
            satisfied: 1,
            unsatisfied: 1,
        };
        let pct = counts.percentages();
        assert_eq!((pct.very_satisfied, pct.satisfied, pct.unsatisfied), (33, 33, 33));

        assert_eq!(SatisfactionCounts::default().percentages(), SatisfactionPercentages::default());
    }

    #[test]
    fn test_counter_merge_and_reset() {
        let mut morning: SatisfactionCounter =
            [Satisfaction::Satisfied, Satisfaction::Satisfied].into_iter().collect();

        let mut afternoon = SatisfactionCounter::new();
        afternoon.update(Satisfaction::Unsatisfied);

        morning.merge(afternoon.counts());
        let counts = morning.counts();
        assert_eq!(counts.satisfied, 2);
        assert_eq!(counts.unsatisfied, 1);
        assert_eq!(morning.count(), 3);

        morning.reset();
        assert!(morning.is_empty());
    }
}
