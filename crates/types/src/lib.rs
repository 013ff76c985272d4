//! Core types and data models for the satisfaction kiosk
//!
//! This crate provides the fundamental data structures shared by the kiosk
//! surface, the record store and the administrative reporting engine.

pub mod clock;
pub mod errors;
pub mod events;
pub mod records;
pub mod satisfaction;
pub mod view;

pub use clock::{Clock, LocalZone, ManualClock, SystemClock};
pub use errors::{KioskError, Result};
pub use events::KioskMessage;
pub use records::{weekday_number, FeedbackRecord, RecordFactory};
pub use satisfaction::Satisfaction;
pub use view::{parse_day, ViewMode, ViewState};
