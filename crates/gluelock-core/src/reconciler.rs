// ── State reconciler ──
//
// Owns the cached lock state and keeps it consistent with the server.
// Two transition paths exist: a successful command applies its target
// immediately, and a reconciliation tick applies the newest relevant
// event from the feed. Both are serialised through a `watch` channel, and
// a tick re-checks its event against `last_event_check` at apply time so
// a command that landed mid-tick always wins. Host updates go out from
// inside the channel update.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use gluelock_api::{GlueClient, HubCommand, LockEvent};

use crate::error::CoreError;
use crate::event_types::EventTypeCache;
use crate::host::{AccessoryHost, Characteristic, CharacteristicValue};
use crate::model::{DeviceIdentity, LockSnapshot, LockState};

/// What a single reconciliation tick did.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// A newer event was found and applied.
    Applied {
        state: LockState,
        event_time: DateTime<Utc>,
    },
    /// No event for this lock newer than `last_event_check`.
    NoNewEvents,
    /// The newest event's type id is not in the catalog.
    UnknownEventType { event_type_id: String },
    /// The event type's description maps to no lock state.
    UnrecognizedDescription { description: String },
    /// A command updated the state while the tick was in flight.
    Superseded,
    /// The lock id is not resolved yet.
    NotReady,
    /// The feed or catalog could not be fetched.
    Failed(CoreError),
}

impl ReconcileOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

pub struct StateReconciler {
    client: Arc<GlueClient>,
    event_types: Arc<EventTypeCache>,
    host: Arc<dyn AccessoryHost>,
    identity: OnceLock<DeviceIdentity>,
    snapshot: watch::Sender<LockSnapshot>,
}

impl StateReconciler {
    pub fn new(
        client: Arc<GlueClient>,
        event_types: Arc<EventTypeCache>,
        host: Arc<dyn AccessoryHost>,
    ) -> Self {
        let (snapshot, _) = watch::channel(LockSnapshot::default());
        Self {
            client,
            event_types,
            host,
            identity: OnceLock::new(),
            snapshot,
        }
    }

    // ── Identity ─────────────────────────────────────────────────────

    /// Record the resolved identity. Only the first call has any effect.
    pub fn set_identity(&self, identity: DeviceIdentity) -> bool {
        self.identity.set(identity).is_ok()
    }

    pub fn identity(&self) -> Option<&DeviceIdentity> {
        self.identity.get()
    }

    fn require_identity(&self) -> Result<&DeviceIdentity, CoreError> {
        self.identity.get().ok_or(CoreError::Resolution {
            missing: "hub and lock ids",
        })
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The cached state. Never touches the network, so it can lag behind a
    /// manual operation on the lock until the next tick.
    pub fn state(&self) -> LockState {
        self.snapshot.borrow().state
    }

    pub fn snapshot(&self) -> LockSnapshot {
        *self.snapshot.borrow()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<LockSnapshot> {
        self.snapshot.subscribe()
    }

    // ── Command-issued transition ────────────────────────────────────

    /// Send a command and apply its target state on success.
    ///
    /// Fails fast when the device is not resolved. On a transport error or
    /// a non-success status the state is left untouched. Never retries.
    pub async fn set_state(&self, command: HubCommand) -> Result<LockState, CoreError> {
        let identity = self.require_identity()?;
        let hub_id = identity.hub_id()?;
        let lock_id = identity.lock_id()?;

        info!(%command, "set state to {}", LockState::from(command));
        let response = self
            .client
            .issue_command(hub_id, lock_id, command)
            .await
            .inspect_err(|e| warn!(error = %e, %command, "lock command failed"))?;

        if !response.is_success() {
            warn!(status = response.status, %command, "lock command rejected");
            return Err(CoreError::Api {
                message: format!("error setting lock state (status {})", response.status),
            });
        }

        let target = LockState::from(command);
        let now = Utc::now();
        self.snapshot.send_modify(|snap| {
            snap.state = target;
            snap.last_event_check = snap.last_event_check.max(now);
            self.publish(target);
        });
        info!(state = %target, "state change completed");
        Ok(target)
    }

    // ── Event-polled transition ──────────────────────────────────────

    /// Run one reconciliation pass against the event feed.
    ///
    /// Best effort: every failure is logged and reported through the
    /// outcome, never as an error.
    pub async fn reconcile(&self) -> ReconcileOutcome {
        let Some(lock_id) = self.identity.get().and_then(|i| i.lock_id().ok()) else {
            debug!("skipping reconciliation: lock id unresolved");
            return ReconcileOutcome::NotReady;
        };

        if !self.event_types.is_loaded() {
            if let Err(e) = self.event_types.refresh().await {
                warn!(error = %e, "event type catalog unavailable; skipping reconciliation");
                return ReconcileOutcome::Failed(e);
            }
        }

        let since = self.snapshot.borrow().last_event_check;
        let events = match self.client.list_events().await {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, transient = e.is_transient(), "event poll failed");
                return ReconcileOutcome::Failed(e.into());
            }
        };

        let Some((event, event_time)) = newest_relevant_event(&events, lock_id, since) else {
            return ReconcileOutcome::NoNewEvents;
        };

        let Some(event_type) = self.event_types.lookup(&event.event_type_id) else {
            debug!(event_type_id = %event.event_type_id, "event type not in catalog");
            return ReconcileOutcome::UnknownEventType {
                event_type_id: event.event_type_id.clone(),
            };
        };

        let Some(state) = LockState::from_description(&event_type.description) else {
            debug!(description = %event_type.description, "event does not describe a lock state");
            return ReconcileOutcome::UnrecognizedDescription {
                description: event_type.description,
            };
        };

        let now = Utc::now();
        let applied = self.snapshot.send_if_modified(|snap| {
            if event_time <= snap.last_event_check {
                return false;
            }
            snap.state = state;
            snap.last_event_check = snap.last_event_check.max(event_time).max(now);
            self.publish(state);
            true
        });

        if !applied {
            debug!(%event_time, "event superseded by a newer update");
            return ReconcileOutcome::Superseded;
        }

        info!(%state, %event_time, "setting status from event feed");
        ReconcileOutcome::Applied { state, event_time }
    }

    /// Push `state` to the host. Called with the snapshot write lock held,
    /// so hosts see transitions in the order they were applied.
    fn publish(&self, state: LockState) {
        self.host.set_characteristic(
            Characteristic::LockCurrentState,
            CharacteristicValue::Lock(state),
        );
        if state.is_known() {
            self.host.set_characteristic(
                Characteristic::LockTargetState,
                CharacteristicValue::Lock(state),
            );
        }
    }
}

/// The first event, in server order, that belongs to `lock_id` and is
/// strictly newer than `since`. Events with unparseable timestamps are
/// skipped.
///
/// The feed is trusted to be newest-first; no local sort happens.
pub fn newest_relevant_event<'a>(
    events: &'a [LockEvent],
    lock_id: &str,
    since: DateTime<Utc>,
) -> Option<(&'a LockEvent, DateTime<Utc>)> {
    events
        .iter()
        .filter(|event| event.lock_id == lock_id)
        .find_map(|event| {
            event
                .created_at()
                .filter(|created| *created > since)
                .map(|created| (event, created))
        })
}
