//! Confirmation notice shown after an accepted submission
//!
//! The notice is dismissed by a scheduled task. Showing a newer notice cancels
//! the pending dismissal of the previous one, and dropping the board cancels
//! whatever is still pending.

use chrono::{DateTime, Utc};
use kiosk_types::{FeedbackRecord, Satisfaction};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Default time a notice stays visible
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(1200);

pub const NOTICE_MESSAGE: &str = "Obrigado pelo seu feedback!";
pub const NOTICE_DETAIL: &str = "Registado com sucesso";

/// Thank-you notice for the last accepted submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmationNotice {
    pub satisfaction: Satisfaction,
    pub emoji: String,
    pub title: String,
    pub message: String,
    pub detail: String,
    pub shown_at: DateTime<Utc>,
}

impl ConfirmationNotice {
    pub fn for_record(record: &FeedbackRecord) -> Self {
        let satisfaction = record.satisfaction();
        Self {
            satisfaction,
            emoji: satisfaction.emoji().to_string(),
            title: satisfaction.title().to_string(),
            message: NOTICE_MESSAGE.to_string(),
            detail: NOTICE_DETAIL.to_string(),
            shown_at: record.timestamp(),
        }
    }
}

#[derive(Debug, Default)]
struct NoticeSlot {
    generation: u64,
    notice: Option<ConfirmationNotice>,
}

/// Holds the visible notice and its pending dismissal
#[derive(Debug)]
pub struct NoticeBoard {
    duration: Duration,
    slot: Arc<Mutex<NoticeSlot>>,
    dismissal: Mutex<Option<JoinHandle<()>>>,
}

impl NoticeBoard {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            slot: Arc::new(Mutex::new(NoticeSlot::default())),
            dismissal: Mutex::new(None),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show `notice`, replacing any visible one and rescheduling dismissal
    pub fn show(&self, notice: ConfirmationNotice) {
        let generation = {
            let mut slot = self.slot.lock();
            slot.generation += 1;
            slot.notice = Some(notice);
            slot.generation
        };

        let mut dismissal = self.dismissal.lock();
        if let Some(previous) = dismissal.take() {
            previous.abort();
        }

        match Handle::try_current() {
            Ok(handle) => {
                let slot = Arc::clone(&self.slot);
                let duration = self.duration;
                *dismissal = Some(handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    let mut slot = slot.lock();
                    if slot.generation == generation {
                        slot.notice = None;
                        debug!(generation, "Confirmation notice dismissed");
                    }
                }));
            }
            Err(_) => debug!("No runtime available, notice stays until replaced or cleared"),
        }
    }

    /// Currently visible notice
    pub fn current(&self) -> Option<ConfirmationNotice> {
        self.slot.lock().notice.clone()
    }

    /// Hide the notice and cancel its dismissal
    pub fn clear(&self) {
        if let Some(pending) = self.dismissal.lock().take() {
            pending.abort();
        }
        let mut slot = self.slot.lock();
        slot.generation += 1;
        slot.notice = None;
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

impl Drop for NoticeBoard {
    fn drop(&mut self) {
        if let Some(pending) = self.dismissal.get_mut().take() {
            pending.abort();
        }
    }
}
