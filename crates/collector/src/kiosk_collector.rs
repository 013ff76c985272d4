//! Kiosk Collector
//!
//! This module ties the submission pipeline together: debounce guard, record
//! factory, shared store, confirmation notice and intake statistics.

use dashmap::DashMap;
use kiosk_types::{Clock, FeedbackRecord, LocalZone, RecordFactory, Satisfaction, SystemClock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::guard::{GuardError, SubmissionGuard, DEFAULT_LOCK_WINDOW};
use crate::notice::{ConfirmationNotice, NoticeBoard, DEFAULT_NOTICE_DURATION};
use crate::store::{RecordStore, StoreError, DEFAULT_BROADCAST_CAPACITY};

/// Submit error types
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Another submission was accepted too recently
    #[error("Submission locked. Retry after {retry_after:?}")]
    Locked {
        /// Time left until submissions are accepted again
        retry_after: Duration,
    },

    /// Store rejected the record
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<GuardError> for SubmitError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Locked { retry_after } => SubmitError::Locked { retry_after },
        }
    }
}

/// Builder error types
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid collector configuration: {0}")]
    InvalidConfig(String),
}

/// Kiosk collector configuration
#[derive(Debug, Clone)]
pub struct KioskCollectorConfig {
    /// Lock window after an accepted submission
    pub lock_window: Duration,
    /// Visibility of the confirmation notice
    pub notice_duration: Duration,
    /// Broadcast capacity of a store created by the builder
    pub broadcast_capacity: usize,
}

impl Default for KioskCollectorConfig {
    fn default() -> Self {
        Self {
            lock_window: DEFAULT_LOCK_WINDOW,
            notice_duration: DEFAULT_NOTICE_DURATION,
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

impl KioskCollectorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.lock_window.is_zero() {
            return Err("lock_window must be greater than 0".to_string());
        }
        if self.notice_duration.is_zero() {
            return Err("notice_duration must be greater than 0".to_string());
        }
        if self.broadcast_capacity == 0 {
            return Err("broadcast_capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Counters shown in the kiosk header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KioskSummary {
    /// All records in the store
    pub total: usize,
    /// Records created on the current local date
    pub today: usize,
    /// Whether a submission right now would be rejected
    pub locked: bool,
    /// Visible confirmation notice, if any
    pub notice: Option<ConfirmationNotice>,
}

/// Intake statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectorStats {
    /// Submission attempts
    pub submissions_received: u64,
    /// Attempts that produced a record
    pub submissions_accepted: u64,
    /// Attempts rejected by the lock window
    pub submissions_locked: u64,
    /// Attempts the store refused
    pub submissions_failed: u64,
    /// Records currently stored
    pub records_stored: usize,
    /// Live store subscriptions
    pub subscribers: usize,
}

/// Kiosk collector
#[derive(Debug)]
pub struct KioskCollector {
    config: KioskCollectorConfig,
    factory: RecordFactory,
    store: Arc<RecordStore>,
    guard: SubmissionGuard,
    notices: NoticeBoard,
    stats: Arc<DashMap<String, u64>>,
}

impl KioskCollector {
    /// Create a collector with its own store
    pub fn new(config: KioskCollectorConfig, clock: Arc<dyn Clock>, zone: LocalZone) -> Self {
        let store = Arc::new(RecordStore::new(config.broadcast_capacity));
        Self::with_store(config, RecordFactory::new(clock, zone), store)
    }

    /// Create a collector feeding an existing shared store
    pub fn with_store(
        config: KioskCollectorConfig,
        factory: RecordFactory,
        store: Arc<RecordStore>,
    ) -> Self {
        let stats = Arc::new(DashMap::new());
        stats.insert("submissions_received".to_string(), 0);
        stats.insert("submissions_accepted".to_string(), 0);
        stats.insert("submissions_locked".to_string(), 0);
        stats.insert("submissions_failed".to_string(), 0);

        Self {
            guard: SubmissionGuard::new(config.lock_window),
            notices: NoticeBoard::new(config.notice_duration),
            config,
            factory,
            store,
            stats,
        }
    }

    /// Record one satisfaction answer
    ///
    /// Rejected attempts leave the store untouched and broadcast nothing.
    pub fn submit(&self, satisfaction: Satisfaction) -> Result<FeedbackRecord, SubmitError> {
        self.increment("submissions_received");
        let now = self.factory.clock().now();

        let until = match self.guard.try_acquire(now) {
            Ok(until) => until,
            Err(err) => {
                self.increment("submissions_locked");
                debug!(satisfaction = %satisfaction, "Submission rejected while locked");
                return Err(err.into());
            }
        };

        let record = self.factory.create_at(satisfaction, now);
        if let Err(err) = self.store.append(record.clone()) {
            // nothing was recorded, so the kiosk must not stay locked
            self.guard.release(until);
            self.increment("submissions_failed");
            error!(record_id = %record.id(), error = %err, "Failed to store record");
            return Err(err.into());
        }

        self.notices.show(ConfirmationNotice::for_record(&record));
        self.increment("submissions_accepted");

        info!(
            record_id = %record.id(),
            satisfaction = %satisfaction,
            date = %record.date(),
            time = %record.time(),
            "Feedback recorded"
        );

        Ok(record)
    }

    /// Kiosk header counters and the visible notice
    pub fn summary(&self) -> KioskSummary {
        let today = self.factory.today();
        KioskSummary {
            total: self.store.len(),
            today: self.store.count_matching(|r| r.is_on(today)),
            locked: self.is_locked(),
            notice: self.notices.current(),
        }
    }

    /// Whether a submission right now would be rejected
    pub fn is_locked(&self) -> bool {
        self.guard.is_locked(self.factory.clock().now())
    }

    /// Get current statistics
    pub fn stats(&self) -> CollectorStats {
        CollectorStats {
            submissions_received: self.counter("submissions_received"),
            submissions_accepted: self.counter("submissions_accepted"),
            submissions_locked: self.counter("submissions_locked"),
            submissions_failed: self.counter("submissions_failed"),
            records_stored: self.store.len(),
            subscribers: self.store.subscriber_count(),
        }
    }

    pub fn config(&self) -> &KioskCollectorConfig {
        &self.config
    }

    /// Shared store fed by this collector
    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn factory(&self) -> &RecordFactory {
        &self.factory
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    fn increment(&self, key: &str) {
        self.stats
            .entry(key.to_string())
            .and_modify(|v| *v += 1)
            .or_insert(1);
    }

    fn counter(&self, key: &str) -> u64 {
        self.stats.get(key).map(|v| *v).unwrap_or(0)
    }
}

/// Kiosk collector builder
pub struct KioskCollectorBuilder {
    config: KioskCollectorConfig,
    clock: Arc<dyn Clock>,
    zone: LocalZone,
    store: Option<Arc<RecordStore>>,
}

impl KioskCollectorBuilder {
    /// Create new builder
    pub fn new() -> Self {
        Self {
            config: KioskCollectorConfig::default(),
            clock: Arc::new(SystemClock),
            zone: LocalZone::default(),
            store: None,
        }
    }

    /// Set the time source
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the zone used for calendar fields
    pub fn zone(mut self, zone: LocalZone) -> Self {
        self.zone = zone;
        self
    }

    /// Set the lock window
    pub fn lock_window(mut self, window: Duration) -> Self {
        self.config.lock_window = window;
        self
    }

    /// Set the notice duration
    pub fn notice_duration(mut self, duration: Duration) -> Self {
        self.config.notice_duration = duration;
        self
    }

    /// Set broadcast capacity for a store created by the builder
    pub fn broadcast_capacity(mut self, capacity: usize) -> Self {
        self.config.broadcast_capacity = capacity;
        self
    }

    /// Feed an existing shared store
    pub fn store(mut self, store: Arc<RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the collector
    pub fn build(self) -> Result<KioskCollector, BuildError> {
        self.config.validate().map_err(BuildError::InvalidConfig)?;

        let factory = RecordFactory::new(self.clock, self.zone);
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(RecordStore::new(self.config.broadcast_capacity)));

        Ok(KioskCollector::with_store(self.config, factory, store))
    }
}

impl Default for KioskCollectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
