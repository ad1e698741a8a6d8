//! # Reminder Store
//!
//! Holds the latest due-reminder set and publishes it to readers through a
//! `watch` channel. Every poll takes a sequence number when it is issued; a
//! response is committed only if its number is newer than the last committed
//! one, so a slow early poll can never overwrite a later one.

use crate::api::DueReminder;
use chrono::{DateTime, Local};
use log::debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Published state of the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderSnapshot {
    /// Due reminders in server response order
    pub reminders: Vec<DueReminder>,
    /// Sequence number of the poll that produced `reminders` (0 = never polled)
    pub seq: u64,
    /// Number of commits so far
    pub revision: u64,
    /// When the last commit happened
    pub polled_at: Option<DateTime<Local>>,
}

/// Sequence number handed out when a poll is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Result of trying to apply a poll response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Response became the current value
    Committed { count: usize },
    /// A newer poll had already committed; response dropped
    Stale,
    /// Fetch failed; prior value kept
    Failed,
    /// Store was closed on teardown; response dropped
    Closed,
}

/// Single-writer, multi-reader holder of the due-reminder set
#[derive(Clone)]
pub struct ReminderStore {
    tx: Arc<watch::Sender<ReminderSnapshot>>,
    next_seq: Arc<AtomicU64>,
    closed: Arc<AtomicBool>,
}

impl ReminderStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ReminderSnapshot::default());
        ReminderStore {
            tx: Arc::new(tx),
            next_seq: Arc::new(AtomicU64::new(0)),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<ReminderSnapshot> {
        self.tx.subscribe()
    }

    /// Current due reminders
    pub fn reminders(&self) -> Vec<DueReminder> {
        self.tx.borrow().reminders.clone()
    }

    pub fn snapshot(&self) -> ReminderSnapshot {
        self.tx.borrow().clone()
    }

    /// Reserve a sequence number for a poll about to be issued
    pub fn begin_request(&self) -> RequestToken {
        RequestToken(self.next_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Apply a poll response if it is newer than the current value
    pub fn commit(&self, token: RequestToken, reminders: Vec<DueReminder>) -> PollOutcome {
        let mut outcome = PollOutcome::Closed;
        let mut pending = Some(reminders);

        self.tx.send_if_modified(|current| {
            if self.closed.load(Ordering::SeqCst) {
                return false;
            }
            if token.0 <= current.seq {
                outcome = PollOutcome::Stale;
                return false;
            }
            let reminders = pending.take().unwrap_or_default();
            outcome = PollOutcome::Committed {
                count: reminders.len(),
            };
            current.reminders = reminders;
            current.seq = token.0;
            current.revision += 1;
            current.polled_at = Some(Local::now());
            true
        });

        match outcome {
            PollOutcome::Stale => debug!("Dropped stale reminder response #{}", token.0),
            PollOutcome::Committed { count } => {
                debug!("Committed reminder response #{} ({} due)", token.0, count)
            }
            _ => {}
        }
        outcome
    }

    /// Freeze the store; later commits are dropped.
    ///
    /// Takes the channel's write lock so a commit racing with `close` has
    /// either finished or will observe the flag.
    pub fn close(&self) {
        self.tx.send_if_modified(|_| {
            self.closed.store(true, Ordering::SeqCst);
            false
        });
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for ReminderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Frequency;

    fn due(id: i64) -> DueReminder {
        DueReminder {
            resolution_id: id,
            resolution_title: format!("Resolution {}", id),
            frequency: Frequency::Weekly,
            next_due: "2026-01-01".to_string(),
        }
    }

    #[test]
    fn test_tokens_are_monotonic() {
        let store = ReminderStore::new();
        let a = store.begin_request();
        let b = store.begin_request();
        assert!(b > a);
        assert_eq!(a.seq(), 1);
        assert_eq!(b.seq(), 2);
    }

    #[test]
    fn test_commit_replaces_value() {
        let store = ReminderStore::new();
        let token = store.begin_request();

        assert_eq!(
            store.commit(token, vec![due(1), due(2)]),
            PollOutcome::Committed { count: 2 }
        );
        let snapshot = store.snapshot();
        assert_eq!(snapshot.reminders, vec![due(1), due(2)]);
        assert_eq!(snapshot.revision, 1);
        assert!(snapshot.polled_at.is_some());
    }

    #[test]
    fn test_older_token_is_stale() {
        let store = ReminderStore::new();
        let a = store.begin_request();
        let b = store.begin_request();

        assert_eq!(store.commit(b, vec![due(2)]), PollOutcome::Committed { count: 1 });
        assert_eq!(store.commit(a, vec![due(1)]), PollOutcome::Stale);
        assert_eq!(store.reminders(), vec![due(2)]);
        assert_eq!(store.snapshot().revision, 1);
    }

    #[test]
    fn test_older_token_commits_if_newer_never_did() {
        let store = ReminderStore::new();
        let a = store.begin_request();
        let _b = store.begin_request();

        assert_eq!(store.commit(a, vec![due(1)]), PollOutcome::Committed { count: 1 });
        assert_eq!(store.reminders(), vec![due(1)]);
    }

    #[test]
    fn test_closed_store_ignores_commits() {
        let store = ReminderStore::new();
        let token = store.begin_request();
        store.close();

        assert_eq!(store.commit(token, vec![due(1)]), PollOutcome::Closed);
        assert!(store.reminders().is_empty());
        assert!(store.is_closed());
    }

    #[test]
    fn test_subscribers_see_commits() {
        let store = ReminderStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.commit(store.begin_request(), vec![due(3)]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().reminders, vec![due(3)]);
    }

    #[test]
    fn test_stale_commit_does_not_notify() {
        let store = ReminderStore::new();
        let a = store.begin_request();
        let b = store.begin_request();
        store.commit(b, vec![due(2)]);

        let mut rx = store.subscribe();
        rx.borrow_and_update();
        store.commit(a, vec![due(1)]);
        assert!(!rx.has_changed().unwrap());
    }
}
