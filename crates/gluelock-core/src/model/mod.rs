// ── Domain types ──

mod battery;
mod identity;
mod lock_state;

pub use battery::{BatteryReading, ChargingState, LOW_BATTERY_THRESHOLD, LowBatteryStatus};
pub use identity::DeviceIdentity;
pub use lock_state::{LockSnapshot, LockState};
