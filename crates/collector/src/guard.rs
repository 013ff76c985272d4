//! Submission debounce guard
//!
//! After an accepted submission the kiosk stays locked for a fixed window.
//! Attempts strictly before the unlock instant are rejected; attempts at or
//! after it are accepted and start a new window.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::time::Duration;

/// Default lock window after an accepted submission
pub const DEFAULT_LOCK_WINDOW: Duration = Duration::from_millis(2000);

/// Guard error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GuardError {
    /// Still inside the lock window
    #[error("Submission locked. Retry after {retry_after:?}")]
    Locked {
        /// Time left until the guard unlocks
        retry_after: Duration,
    },
}

/// Debounce lock keyed on the instant it unlocks
#[derive(Debug)]
pub struct SubmissionGuard {
    window: Duration,
    unlocked_at: Mutex<Option<DateTime<Utc>>>,
}

impl SubmissionGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            unlocked_at: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Check and take the lock at `now`
    ///
    /// On success returns the instant the new window ends.
    pub fn try_acquire(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, GuardError> {
        let mut unlocked_at = self.unlocked_at.lock();

        if let Some(until) = *unlocked_at {
            if now < until {
                let retry_after = (until - now).to_std().unwrap_or_default();
                return Err(GuardError::Locked { retry_after });
            }
        }

        let until = now + self.window_delta();
        *unlocked_at = Some(until);
        Ok(until)
    }

    /// Give back a window taken by [`try_acquire`](Self::try_acquire)
    ///
    /// Only the window ending at `until` is released; a newer one is kept.
    pub fn release(&self, until: DateTime<Utc>) -> bool {
        let mut unlocked_at = self.unlocked_at.lock();
        if *unlocked_at == Some(until) {
            *unlocked_at = None;
            true
        } else {
            false
        }
    }

    /// Whether an attempt at `now` would be rejected
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        matches!(*self.unlocked_at.lock(), Some(until) if now < until)
    }

    /// End of the current or most recent window
    pub fn unlocked_at(&self) -> Option<DateTime<Utc>> {
        *self.unlocked_at.lock()
    }

    fn window_delta(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.window).unwrap_or_else(|_| chrono::Duration::days(365))
    }
}

impl Default for SubmissionGuard {
    fn default() -> Self {
        Self::new(DEFAULT_LOCK_WINDOW)
    }
}
