// ── Battery telemetry ──

use std::sync::Arc;

use tracing::{info, warn};

use gluelock_api::GlueClient;

use crate::model::{BatteryReading, LowBatteryStatus};

/// Fetches and normalises the lock's battery level.
///
/// Failures never propagate: a missing reading means "unknown", which is
/// different from an empty battery.
pub struct BatteryMonitor {
    client: Arc<GlueClient>,
}

impl BatteryMonitor {
    pub fn new(client: Arc<GlueClient>) -> Self {
        Self { client }
    }

    pub async fn battery_level(&self, lock_id: &str) -> Option<BatteryReading> {
        let status = match self.client.get_lock(lock_id).await {
            Ok(status) => status,
            Err(e) => {
                warn!(
                    lock_id,
                    status = ?e.status(),
                    transient = e.is_transient(),
                    error = %e,
                    "error getting battery level"
                );
                return None;
            }
        };

        let Some(reading) = BatteryReading::from_status(&status) else {
            warn!(lock_id, "lock status carries no battery reading");
            return None;
        };
        info!(lock_id, raw = reading.raw, "battery level is {:.1}%", reading.percentage);
        Some(reading)
    }

    pub async fn low_battery_status(&self, lock_id: &str) -> Option<LowBatteryStatus> {
        self.battery_level(lock_id)
            .await
            .map(|reading| reading.low_battery_status())
    }
}
