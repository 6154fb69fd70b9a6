// ── Host capability surface ──
//
// The home-automation host is injected as a trait object. The core pushes
// characteristic updates into it and answers its get/set requests through
// completion callbacks.

use crate::error::CoreError;
use crate::model::{ChargingState, LockState, LowBatteryStatus};

/// Characteristics the accessory exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Characteristic {
    LockCurrentState,
    LockTargetState,
    BatteryLevel,
    StatusLowBattery,
    ChargingState,
}

impl Characteristic {
    /// Whether the host may set this characteristic.
    pub fn is_writable(self) -> bool {
        matches!(self, Self::LockTargetState)
    }
}

/// A value flowing between the accessory and the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacteristicValue {
    Lock(LockState),
    /// Battery charge in percent.
    Percentage(f64),
    LowBattery(LowBatteryStatus),
    Charging(ChargingState),
}

impl CharacteristicValue {
    /// Numeric encoding used by the host protocol.
    pub fn host_value(&self) -> f64 {
        match self {
            Self::Lock(state) => f64::from(state.host_code()),
            Self::Percentage(pct) => *pct,
            Self::LowBattery(status) => f64::from(status.host_code()),
            Self::Charging(state) => f64::from(state.host_code()),
        }
    }
}

/// Completion callback for host requests.
pub type Completion<T> = Box<dyn FnOnce(Result<T, CoreError>) + Send + 'static>;

/// Sink for characteristic updates pushed by the accessory.
///
/// Implementations must not block and must not read the accessory back:
/// the call happens while a state transition holds the snapshot lock.
pub trait AccessoryHost: Send + Sync {
    fn set_characteristic(&self, characteristic: Characteristic, value: CharacteristicValue);
}

/// A host that discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl AccessoryHost for NoopHost {
    fn set_characteristic(&self, _characteristic: Characteristic, _value: CharacteristicValue) {}
}
