// ── Lock accessory ──
//
// Facade the host talks to. Wires the client, the event-type cache, the
// resolver, the reconciler and the battery monitor together, owns the
// background timers, and answers characteristic get/set requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use gluelock_api::{GlueClient, HubCommand, TransportConfig};

use crate::battery::BatteryMonitor;
use crate::config::AccessoryConfig;
use crate::error::CoreError;
use crate::event_types::EventTypeCache;
use crate::host::{AccessoryHost, Characteristic, CharacteristicValue, Completion};
use crate::model::{BatteryReading, ChargingState, DeviceIdentity, LockState, LowBatteryStatus};
use crate::reconciler::{ReconcileOutcome, StateReconciler};
use crate::resolver::DeviceResolver;
use crate::tasks::BackgroundTasks;

/// A single Glue lock exposed to the host.
///
/// Cheaply cloneable via `Arc<AccessoryInner>`. Construction does no I/O;
/// call [`start()`](Self::start) to resolve the device and start polling.
#[derive(Clone)]
pub struct LockAccessory {
    inner: Arc<AccessoryInner>,
}

struct AccessoryInner {
    config: AccessoryConfig,
    client: Arc<GlueClient>,
    event_types: Arc<EventTypeCache>,
    resolver: DeviceResolver,
    reconciler: Arc<StateReconciler>,
    battery: BatteryMonitor,
    tasks: BackgroundTasks,
    started: AtomicBool,
}

impl LockAccessory {
    /// Validate the config and build an accessory talking to `config.url`.
    pub fn new(config: AccessoryConfig, host: Arc<dyn AccessoryHost>) -> Result<Self, CoreError> {
        config.validate()?;
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = GlueClient::new(
            config.url.clone(),
            config.username.clone(),
            config.password.clone(),
            &transport,
        )?;
        Ok(Self::assemble(config, Arc::new(client), host))
    }

    /// Build an accessory around an existing client.
    pub fn with_client(
        config: AccessoryConfig,
        client: Arc<GlueClient>,
        host: Arc<dyn AccessoryHost>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self::assemble(config, client, host))
    }

    fn assemble(config: AccessoryConfig, client: Arc<GlueClient>, host: Arc<dyn AccessoryHost>) -> Self {
        let event_types = Arc::new(EventTypeCache::new(Arc::clone(&client)));
        let reconciler = Arc::new(StateReconciler::new(
            Arc::clone(&client),
            Arc::clone(&event_types),
            host,
        ));
        Self {
            inner: Arc::new(AccessoryInner {
                resolver: DeviceResolver::new(Arc::clone(&client)),
                battery: BatteryMonitor::new(Arc::clone(&client)),
                config,
                client,
                event_types,
                reconciler,
                tasks: BackgroundTasks::new(),
                started: AtomicBool::new(false),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn config(&self) -> &AccessoryConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &Arc<GlueClient> {
        &self.inner.client
    }

    pub fn reconciler(&self) -> &Arc<StateReconciler> {
        &self.inner.reconciler
    }

    pub fn event_types(&self) -> &Arc<EventTypeCache> {
        &self.inner.event_types
    }

    pub fn identity(&self) -> Option<&DeviceIdentity> {
        self.inner.reconciler.identity()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Load the event-type catalog, resolve the device and run a first
    /// reconciliation pass. Never fails: every step is best effort.
    pub async fn initialize(&self) -> ReconcileOutcome {
        let inner = &self.inner;

        if let Err(e) = inner.event_types.refresh().await {
            warn!(error = %e, "could not load event types");
        }

        if inner.reconciler.identity().is_none() {
            let identity = inner
                .resolver
                .resolve(inner.config.hub_id.as_deref(), inner.config.lock_id.as_deref())
                .await;
            inner.reconciler.set_identity(identity);
        }

        let outcome = inner.reconciler.reconcile().await;
        debug!(outcome = ?outcome, "initial reconciliation");
        outcome
    }

    /// Initialize, then start the background timers. Later calls are no-ops.
    pub async fn start(&self) -> Option<ReconcileOutcome> {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return None;
        }
        let outcome = self.initialize().await;

        let inner = &self.inner;
        inner.tasks.spawn_event_type_refresh(
            Arc::clone(&inner.event_types),
            inner.config.event_types_refresh_interval,
        );
        if inner.config.check_for_events {
            inner.tasks.spawn_reconcile_loop(
                Arc::clone(&inner.reconciler),
                inner.config.check_for_events_interval,
            );
        } else {
            info!("check-for-events is off; state only follows commands");
        }

        info!(name = %self.name(), "accessory started");
        Some(outcome)
    }

    /// Stop the timers and wait for in-flight work.
    pub async fn shutdown(&self) {
        self.inner.tasks.shutdown().await;
        info!(name = %self.name(), "accessory stopped");
    }

    pub fn is_running(&self) -> bool {
        self.inner.started.load(Ordering::SeqCst) && !self.inner.tasks.is_shutdown()
    }

    // ── Lock mechanism ───────────────────────────────────────────────

    pub fn get_current_lock_state(&self) -> LockState {
        let state = self.inner.reconciler.state();
        info!(%state, "get current state");
        state
    }

    /// The target mirrors the cached current state.
    pub fn get_target_lock_state(&self) -> LockState {
        let state = self.inner.reconciler.state();
        info!(%state, "get target state");
        state
    }

    pub async fn set_target_lock_state(&self, command: HubCommand) -> Result<(), CoreError> {
        self.inner.reconciler.set_state(command).await.map(|_| ())
    }

    // ── Battery service ──────────────────────────────────────────────

    pub async fn get_battery_level(&self) -> Result<BatteryReading, CoreError> {
        let lock_id = self.resolved_lock_id()?;
        self.inner
            .battery
            .battery_level(&lock_id)
            .await
            .ok_or(CoreError::ReadingUnavailable)
    }

    pub async fn get_low_battery_status(&self) -> Result<LowBatteryStatus, CoreError> {
        let lock_id = self.resolved_lock_id()?;
        self.inner
            .battery
            .low_battery_status(&lock_id)
            .await
            .ok_or(CoreError::ReadingUnavailable)
    }

    pub fn charging_state(&self) -> ChargingState {
        ChargingState::NotCharging
    }

    fn resolved_lock_id(&self) -> Result<String, CoreError> {
        self.identity()
            .ok_or(CoreError::Resolution { missing: "lock id" })?
            .lock_id()
            .map(str::to_owned)
    }

    // ── Host requests ────────────────────────────────────────────────

    /// Answer a host read request through `done`.
    pub async fn handle_get(&self, characteristic: Characteristic, done: Completion<CharacteristicValue>) {
        let result = match characteristic {
            Characteristic::LockCurrentState => Ok(CharacteristicValue::Lock(self.get_current_lock_state())),
            Characteristic::LockTargetState => Ok(CharacteristicValue::Lock(self.get_target_lock_state())),
            Characteristic::BatteryLevel => self
                .get_battery_level()
                .await
                .map(|reading| CharacteristicValue::Percentage(reading.percentage)),
            Characteristic::StatusLowBattery => self
                .get_low_battery_status()
                .await
                .map(CharacteristicValue::LowBattery),
            Characteristic::ChargingState => Ok(CharacteristicValue::Charging(self.charging_state())),
        };
        done(result);
    }

    /// Answer a host write request through `done`.
    ///
    /// Only the target lock state is writable, and only with a concrete
    /// locked/unlocked value.
    pub async fn handle_set(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
        done: Completion<()>,
    ) {
        if !characteristic.is_writable() {
            done(Err(CoreError::Unsupported {
                operation: format!("set read-only {characteristic}"),
            }));
            return;
        }
        let command = match value {
            CharacteristicValue::Lock(state) => state.command(),
            _ => None,
        };
        let result = match command {
            Some(command) => self.set_target_lock_state(command).await,
            None => Err(CoreError::Unsupported {
                operation: format!("set {characteristic} to {value:?}"),
            }),
        };
        done(result);
    }
}
