//! Kiosk Collector
//!
//! This crate provides the intake side of the satisfaction kiosk: the shared
//! in-memory record store with its new-record broadcast, the debounce guard
//! that locks the kiosk after each answer, the confirmation notice and the
//! collector that ties them together.

pub mod guard;
pub mod kiosk_collector;
pub mod notice;
pub mod store;

pub use guard::{GuardError, SubmissionGuard, DEFAULT_LOCK_WINDOW};

pub use kiosk_collector::{
    BuildError, CollectorStats, KioskCollector, KioskCollectorBuilder, KioskCollectorConfig,
    KioskSummary, SubmitError,
};

pub use notice::{ConfirmationNotice, NoticeBoard, DEFAULT_NOTICE_DURATION};

pub use store::{RecordStore, RecordSubscription, StoreError, DEFAULT_BROADCAST_CAPACITY};
