// gluelock-core: Lock state reconciliation between a home-automation host
// and the Glue REST API.

pub mod accessory;
pub mod battery;
pub mod config;
pub mod error;
pub mod event_types;
pub mod host;
pub mod model;
pub mod reconciler;
pub mod resolver;
pub mod tasks;

// ── Primary re-exports ──────────────────────────────────────────────
pub use accessory::LockAccessory;
pub use battery::BatteryMonitor;
pub use config::AccessoryConfig;
pub use error::CoreError;
pub use event_types::{EventTypeCache, EventTypeCatalog};
pub use host::{AccessoryHost, Characteristic, CharacteristicValue, Completion, NoopHost};
pub use reconciler::{ReconcileOutcome, StateReconciler};
pub use resolver::DeviceResolver;
pub use tasks::BackgroundTasks;

pub use model::{BatteryReading, ChargingState, DeviceIdentity, LockSnapshot, LockState, LowBatteryStatus};

// The command type comes straight from the wire layer.
pub use gluelock_api::{GlueClient, HubCommand};
