//! # Reminder Poller
//!
//! Fetches the due-reminder set immediately on start and then once per
//! interval. Polls may overlap; the store's sequence check decides which
//! response wins. Fetch errors are logged and otherwise ignored, since the
//! next tick is the retry.

use crate::api::ReminderSource;
use crate::features::reminders::store::{PollOutcome, ReminderStore, RequestToken};
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

/// Run one poll against `source` and apply it under `token`
pub async fn poll_once(
    source: &dyn ReminderSource,
    store: &ReminderStore,
    token: RequestToken,
) -> PollOutcome {
    if store.is_closed() {
        return PollOutcome::Closed;
    }
    match source.due_reminders().await {
        Ok(reminders) => store.commit(token, reminders),
        Err(e) => {
            warn!("Reminder poll #{} failed: {}", token.seq(), e);
            PollOutcome::Failed
        }
    }
}

/// Owned handle to a running poller. Stopping (or dropping) it ends the
/// timer, aborts in-flight polls and freezes the store.
pub struct PollerHandle {
    task: Option<JoinHandle<()>>,
    refresh_tx: mpsc::UnboundedSender<()>,
    store: ReminderStore,
}

impl PollerHandle {
    /// Request an immediate poll outside the regular schedule
    pub fn refresh(&self) -> bool {
        self.task.is_some() && self.refresh_tx.send(()).is_ok()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    pub fn store(&self) -> &ReminderStore {
        &self.store
    }

    /// Stop polling; no store mutation happens after this returns
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            self.store.close();
            task.abort();
            info!("Reminder poller stopped");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start polling `source` every `interval`, publishing into `store`
pub fn start(
    source: Arc<dyn ReminderSource>,
    store: ReminderStore,
    interval: Duration,
) -> PollerHandle {
    let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
    let loop_store = store.clone();

    info!("Reminder poller started (every {:?})", interval);
    let task = tokio::spawn(async move {
        run(source, loop_store, interval, refresh_rx).await;
    });

    PollerHandle {
        task: Some(task),
        refresh_tx,
        store,
    }
}

async fn run(
    source: Arc<dyn ReminderSource>,
    store: ReminderStore,
    interval: Duration,
    mut refresh_rx: mpsc::UnboundedReceiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Dropped with this task on abort, which cancels every in-flight poll
    let mut inflight: JoinSet<PollOutcome> = JoinSet::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => issue(&mut inflight, &source, &store),
            msg = refresh_rx.recv() => match msg {
                Some(()) => issue(&mut inflight, &source, &store),
                None => break,
            },
            Some(joined) = inflight.join_next(), if !inflight.is_empty() => {
                if let Err(e) = joined {
                    if e.is_panic() {
                        warn!("Reminder poll task panicked: {}", e);
                    }
                }
            }
        }
    }
}

fn issue(
    inflight: &mut JoinSet<PollOutcome>,
    source: &Arc<dyn ReminderSource>,
    store: &ReminderStore,
) {
    let token = store.begin_request();
    let source = Arc::clone(source);
    let store = store.clone();
    inflight.spawn(async move { poll_once(source.as_ref(), &store, token).await });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResult, DueReminder, Frequency};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn due(id: i64) -> DueReminder {
        DueReminder {
            resolution_id: id,
            resolution_title: format!("Resolution {}", id),
            frequency: Frequency::Daily,
            next_due: "2026-01-01".to_string(),
        }
    }

    /// One scripted response: wait `delay`, then return `result`
    struct Step {
        delay: Duration,
        result: Result<Vec<DueReminder>, u16>,
    }

    fn ok_after(secs: u64, reminders: Vec<DueReminder>) -> Step {
        Step {
            delay: Duration::from_secs(secs),
            result: Ok(reminders),
        }
    }

    fn fail_after(secs: u64, status: u16) -> Step {
        Step {
            delay: Duration::from_secs(secs),
            result: Err(status),
        }
    }

    /// Source that replays steps in call order and hangs once they run out
    struct ScriptedSource {
        steps: Mutex<VecDeque<Step>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(steps: Vec<Step>) -> Arc<Self> {
            Arc::new(ScriptedSource {
                steps: Mutex::new(steps.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReminderSource for ScriptedSource {
        async fn due_reminders(&self) -> ApiResult<Vec<DueReminder>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self.steps.lock().unwrap().pop_front();
            match step {
                Some(step) => {
                    tokio::time::sleep(step.delay).await;
                    step.result.map_err(|status| ApiError::Status {
                        status,
                        body: "scripted failure".to_string(),
                    })
                }
                None => std::future::pending().await,
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_poll_keeps_previous_value() {
        let store = ReminderStore::new();
        let source = ScriptedSource::new(vec![ok_after(0, vec![due(1)]), fail_after(0, 500)]);

        let first = poll_once(source.as_ref(), &store, store.begin_request()).await;
        assert_eq!(first, PollOutcome::Committed { count: 1 });
        let before = store.snapshot();

        let second = poll_once(source.as_ref(), &store, store.begin_request()).await;
        assert_eq!(second, PollOutcome::Failed);
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_store_skips_fetch() {
        let store = ReminderStore::new();
        let source = ScriptedSource::new(vec![ok_after(0, vec![due(1)])]);
        let token = store.begin_request();
        store.close();

        let outcome = poll_once(source.as_ref(), &store, token).await;
        assert_eq!(outcome, PollOutcome::Closed);
        assert_eq!(source.calls(), 0);
        assert!(store.reminders().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_response_of_earlier_poll_is_discarded() {
        let store = ReminderStore::new();
        let slow = ScriptedSource::new(vec![ok_after(5, vec![due(1)])]);
        let fast = ScriptedSource::new(vec![ok_after(1, vec![due(2)])]);

        let token_a = store.begin_request();
        let token_b = store.begin_request();
        let (a, b) = tokio::join!(
            poll_once(slow.as_ref(), &store, token_a),
            poll_once(fast.as_ref(), &store, token_b),
        );

        assert_eq!(b, PollOutcome::Committed { count: 1 });
        assert_eq!(a, PollOutcome::Stale);
        assert_eq!(store.reminders(), vec![due(2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_overlapping_polls_last_issued_wins() {
        let store = ReminderStore::new();
        // Poll A (t=0) resolves at t=25; poll B (t=10) resolves at t=11
        let source = ScriptedSource::new(vec![
            ok_after(25, vec![due(1)]),
            ok_after(1, vec![due(2), due(3)]),
        ]);

        let handle = start(source.clone(), store.clone(), Duration::from_secs(10));
        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(store.reminders(), vec![due(2), due(3)]);

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(store.reminders(), vec![due(2), due(3)]);
        assert_eq!(store.snapshot().seq, 2);
        drop(handle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_fetches_immediately_then_on_interval() {
        let store = ReminderStore::new();
        let source = ScriptedSource::new(vec![
            ok_after(0, vec![due(1)]),
            ok_after(0, vec![due(1), due(2)]),
        ]);

        let _handle = start(source.clone(), store.clone(), Duration::from_secs(300));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls(), 1);
        assert_eq!(store.reminders(), vec![due(1)]);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(source.calls(), 2);
        assert_eq!(store.reminders(), vec![due(1), due(2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_swallows_errors() {
        let store = ReminderStore::new();
        let source = ScriptedSource::new(vec![
            ok_after(0, vec![due(4)]),
            fail_after(0, 503),
        ]);

        let handle = start(source.clone(), store.clone(), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(90)).await;

        assert_eq!(source.calls(), 2);
        assert_eq!(store.reminders(), vec![due(4)]);
        assert!(handle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_polls_out_of_band() {
        let store = ReminderStore::new();
        let source = ScriptedSource::new(vec![
            ok_after(0, vec![due(1)]),
            ok_after(0, Vec::new()),
        ]);

        let handle = start(source.clone(), store.clone(), Duration::from_secs(3600));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.reminders(), vec![due(1)]);

        assert!(handle.refresh());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls(), 2);
        assert!(store.reminders().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_prevents_further_mutation() {
        let store = ReminderStore::new();
        // In flight when the poller stops; would resolve at t=5
        let source = ScriptedSource::new(vec![
            ok_after(5, vec![due(1)]),
            ok_after(0, vec![due(2)]),
        ]);

        let mut handle = start(source.clone(), store.clone(), Duration::from_secs(10));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls(), 1);

        handle.stop();
        assert!(!handle.refresh());
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(source.calls(), 1);
        let snapshot = store.snapshot();
        assert!(snapshot.reminders.is_empty());
        assert_eq!(snapshot.revision, 0);
        assert!(!handle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_poller() {
        let store = ReminderStore::new();
        let source = ScriptedSource::new(vec![
            ok_after(0, vec![due(1)]),
            ok_after(0, vec![due(2)]),
        ]);

        let handle = start(source.clone(), store.clone(), Duration::from_secs(10));
        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(handle);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(source.calls(), 1);
        assert_eq!(store.reminders(), vec![due(1)]);
    }
}
