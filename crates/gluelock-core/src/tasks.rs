// ── Background tasks ──
//
// The two recurring timers (catalog refresh, reconciliation tick) live
// behind one handle so they can be torn down cleanly. Each reconciliation
// tick runs as its own task: a slow tick does not delay the next one.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use crate::event_types::EventTypeCache;
use crate::reconciler::{ReconcileOutcome, StateReconciler};

/// Owner of the accessory's background work.
///
/// Dropping the handle cancels the timers; [`shutdown`](Self::shutdown)
/// also waits for in-flight ticks to finish.
#[derive(Debug, Default)]
pub struct BackgroundTasks {
    cancel: CancellationToken,
    tracker: TaskTracker,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shutdown(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Refresh the event-type catalog every `every`, regardless of
    /// individual refresh outcomes.
    pub fn spawn_event_type_refresh(&self, cache: Arc<EventTypeCache>, every: Duration) {
        let cancel = self.cancel.clone();
        self.tracker.spawn(event_type_refresh_task(cache, every, cancel));
    }

    /// Run a reconciliation tick every `every`.
    pub fn spawn_reconcile_loop(&self, reconciler: Arc<StateReconciler>, every: Duration) {
        let cancel = self.cancel.clone();
        let tracker = self.tracker.clone();
        self.tracker.spawn(reconcile_task(reconciler, every, cancel, tracker));
    }

    /// Cancel every timer and wait for outstanding work to finish.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.tracker.close();
        self.tracker.wait().await;
        debug!("background tasks stopped");
    }
}

impl Drop for BackgroundTasks {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn event_type_refresh_task(
    cache: Arc<EventTypeCache>,
    every: Duration,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    result = cache.refresh() => {
                        if let Err(e) = result {
                            warn!(error = %e, "event type refresh failed; keeping previous catalog");
                        }
                    }
                }
            }
        }
    }
}

async fn reconcile_task(
    reconciler: Arc<StateReconciler>,
    every: Duration,
    cancel: CancellationToken,
    tracker: TaskTracker,
) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // the initial pass happens during startup

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let reconciler = Arc::clone(&reconciler);
                let cancel = cancel.clone();
                tracker.spawn(async move {
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => {}
                        outcome = reconciler.reconcile() => log_outcome(&outcome),
                    }
                });
            }
        }
    }
}

fn log_outcome(outcome: &ReconcileOutcome) {
    match outcome {
        ReconcileOutcome::Applied { .. } | ReconcileOutcome::Failed(_) => {}
        other => debug!(outcome = ?other, "reconciliation tick"),
    }
}
