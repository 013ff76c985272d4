//! Record Store
//!
//! Append-only, in-memory collection of feedback records shared by the kiosk
//! (producer) and the administrative surface (consumer). Every append is
//! broadcast to live subscribers as a [`KioskMessage::NewRecord`].

use kiosk_types::{FeedbackRecord, KioskMessage};
use parking_lot::RwLock;
use std::collections::{HashSet, VecDeque};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Default broadcast channel capacity
pub const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Store error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// A record with the same id was already appended
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Default)]
struct StoreInner {
    /// Newest inserted first
    records: VecDeque<FeedbackRecord>,
    ids: HashSet<String>,
}

/// Shared record store
#[derive(Debug)]
pub struct RecordStore {
    inner: RwLock<StoreInner>,
    sender: broadcast::Sender<KioskMessage>,
}

impl RecordStore {
    /// Create an empty store whose broadcast channel buffers `capacity` messages
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: RwLock::new(StoreInner::default()),
            sender,
        }
    }

    /// Insert a record at the head and notify subscribers
    pub fn append(&self, record: FeedbackRecord) -> Result<(), StoreError> {
        {
            let mut inner = self.inner.write();
            if !inner.ids.insert(record.id().to_string()) {
                return Err(StoreError::DuplicateId(record.id().to_string()));
            }
            inner.records.push_front(record.clone());
        }

        let record_id = record.id().to_string();
        match self.sender.send(KioskMessage::new_record(record)) {
            Ok(receivers) => debug!(record_id = %record_id, receivers, "Broadcast new record"),
            Err(_) => debug!(record_id = %record_id, "No subscribers for new record"),
        }

        Ok(())
    }

    /// Snapshot in insertion order, newest first
    pub fn all(&self) -> Vec<FeedbackRecord> {
        self.inner.read().records.iter().cloned().collect()
    }

    /// Snapshot sorted by timestamp, newest first
    ///
    /// Records with equal timestamps keep their store order.
    pub fn sorted(&self) -> Vec<FeedbackRecord> {
        let mut records = self.all();
        records.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        records
    }

    /// Count records matching `predicate` without cloning them
    pub fn count_matching<F>(&self, predicate: F) -> usize
    where
        F: Fn(&FeedbackRecord) -> bool,
    {
        self.inner.read().records.iter().filter(|r| predicate(r)).count()
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receive every record appended from now on
    pub fn subscribe(&self) -> RecordSubscription {
        RecordSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_CAPACITY)
    }
}

/// Handle on the new-record broadcast; dropping it unsubscribes
#[derive(Debug)]
pub struct RecordSubscription {
    receiver: broadcast::Receiver<KioskMessage>,
}

impl RecordSubscription {
    /// Wait for the next message
    ///
    /// Messages missed because this subscriber lagged are skipped. Returns
    /// `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<KioskMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Record subscriber lagged, skipping missed messages");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next message if one is already queued
    pub fn try_recv(&mut self) -> Option<KioskMessage> {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => return Some(message),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Record subscriber lagged, skipping missed messages");
                }
                Err(_) => return None,
            }
        }
    }

    /// Underlying receiver, for adapting into a stream
    pub fn into_inner(self) -> broadcast::Receiver<KioskMessage> {
        self.receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use kiosk_types::{Clock, LocalZone, ManualClock, RecordFactory, Satisfaction};
    use std::sync::Arc;

    fn factory() -> (Arc<ManualClock>, RecordFactory) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap(),
        ));
        let factory = RecordFactory::new(clock.clone(), LocalZone::utc());
        (clock, factory)
    }

    #[test]
    fn test_append_keeps_newest_first() {
        let (clock, factory) = factory();
        let store = RecordStore::default();

        let first = factory.create(Satisfaction::VerySatisfied);
        clock.advance(Duration::seconds(5));
        let second = factory.create(Satisfaction::Unsatisfied);

        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.all(), vec![second, first]);
    }

    #[test]
    fn test_sorted_is_descending_and_stable() {
        let (clock, factory) = factory();
        let store = RecordStore::default();

        let late = factory.create_at(Satisfaction::Satisfied, clock.now() + Duration::minutes(10));
        let tie_a = factory.create(Satisfaction::VerySatisfied);
        let tie_b = factory.create(Satisfaction::Unsatisfied);

        store.append(late.clone()).unwrap();
        store.append(tie_a.clone()).unwrap();
        store.append(tie_b.clone()).unwrap();

        // tie_b was inserted after tie_a so it sits ahead of it in store order
        assert_eq!(store.sorted(), vec![late, tie_b, tie_a]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let (_clock, factory) = factory();
        let store = RecordStore::default();
        let record = factory.create(Satisfaction::Satisfied);

        store.append(record.clone()).unwrap();
        let err = store.append(record.clone()).unwrap_err();

        assert_eq!(err, StoreError::DuplicateId(record.id().to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_count_matching() {
        let (_clock, factory) = factory();
        let store = RecordStore::default();
        for level in [Satisfaction::Satisfied, Satisfaction::Satisfied, Satisfaction::Unsatisfied] {
            store.append(factory.create(level)).unwrap();
        }
        assert_eq!(store.count_matching(|r| r.satisfaction() == Satisfaction::Satisfied), 2);
        assert!(!store.is_empty());
    }

    #[tokio::test]
    async fn test_subscription_receives_only_later_appends() {
        let (_clock, factory) = factory();
        let store = RecordStore::default();

        store.append(factory.create(Satisfaction::Satisfied)).unwrap();

        let mut subscription = store.subscribe();
        assert_eq!(store.subscriber_count(), 1);

        let record = factory.create(Satisfaction::VerySatisfied);
        store.append(record.clone()).unwrap();

        let message = subscription.recv().await.unwrap();
        assert_eq!(message.record(), &record);
        assert!(subscription.try_recv().is_none());

        drop(subscription);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips_missed_messages() {
        let (_clock, factory) = factory();
        let store = RecordStore::new(2);
        let mut subscription = store.subscribe();

        let records: Vec<_> = (0..5).map(|_| factory.create(Satisfaction::Satisfied)).collect();
        for record in &records {
            store.append(record.clone()).unwrap();
        }

        let first = subscription.recv().await.unwrap();
        assert_eq!(first.record(), &records[3]);
        let second = subscription.recv().await.unwrap();
        assert_eq!(second.record(), &records[4]);
    }
}
