//! One-shot status: a reconciliation pass plus a battery reading.

use serde::Serialize;

use gluelock_core::{
    ChargingState, CoreError, LockAccessory, LockState, LowBatteryStatus, ReconcileOutcome,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

#[derive(Debug, Serialize)]
struct StatusReport {
    name: String,
    hub_id: String,
    lock_id: String,
    state: LockState,
    battery_percentage: Option<f64>,
    low_battery: Option<LowBatteryStatus>,
    charging: ChargingState,
}

pub async fn handle(accessory: &LockAccessory, global: &GlobalOpts) -> Result<(), CliError> {
    if let ReconcileOutcome::Failed(e) = accessory.initialize().await {
        return Err(e.into());
    }

    let identity = accessory
        .identity()
        .ok_or(CoreError::Resolution { missing: "lock id" })?;
    let hub_id = identity.hub_id()?.to_owned();
    let lock_id = identity.lock_id()?.to_owned();

    let reading = match accessory.get_battery_level().await {
        Ok(reading) => Some(reading),
        Err(CoreError::ReadingUnavailable) => None,
        Err(e) => return Err(e.into()),
    };

    let report = StatusReport {
        name: accessory.name().to_owned(),
        hub_id,
        lock_id,
        state: accessory.get_current_lock_state(),
        battery_percentage: reading.map(|r| r.percentage),
        low_battery: reading.map(|r| r.low_battery_status()),
        charging: accessory.charging_state(),
    };

    util::emit(global, &report, |r| {
        println!("{} (hub {}, lock {})", r.name, r.hub_id, r.lock_id);
        println!("state:    {}", r.state);
        match (r.battery_percentage, r.low_battery) {
            (Some(pct), Some(low)) => println!("battery:  {pct:.1}% ({low})"),
            _ => println!("battery:  unavailable"),
        }
        println!("charging: {}", r.charging);
    })
}
