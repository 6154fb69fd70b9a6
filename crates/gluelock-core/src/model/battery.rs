// ── Battery telemetry ──

use serde::{Deserialize, Serialize};

use gluelock_api::LockStatus;

/// Percentage below which the battery is reported low.
pub const LOW_BATTERY_THRESHOLD: f64 = 20.0;

const RAW_MAX: f64 = 255.0;

/// A battery reading normalised from the lock's raw byte.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryReading {
    /// Raw value as reported, clamped to [0, 255].
    pub raw: f64,
    /// Charge in percent, in [0, 100].
    pub percentage: f64,
}

impl BatteryReading {
    /// Scale a raw value. Out-of-range input is clamped; non-finite input
    /// yields no reading.
    pub fn from_raw(raw: f64) -> Option<Self> {
        if !raw.is_finite() {
            return None;
        }
        let raw = raw.clamp(0.0, RAW_MAX);
        // Multiply first so exact fractions (51 -> 20 %) stay exact.
        let percentage = raw * 100.0 / RAW_MAX;
        Some(Self { raw, percentage })
    }

    /// Pick the post-operation reading when present, else the pre-operation one.
    pub fn from_status(status: &LockStatus) -> Option<Self> {
        status
            .battery_status_after
            .or(status.battery_status_before)
            .and_then(Self::from_raw)
    }

    pub fn low_battery_status(&self) -> LowBatteryStatus {
        if self.percentage < LOW_BATTERY_THRESHOLD {
            LowBatteryStatus::Low
        } else {
            LowBatteryStatus::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum LowBatteryStatus {
    Normal,
    Low,
}

impl LowBatteryStatus {
    /// Host encoding: normal = 0, low = 1.
    pub fn host_code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Low => 1,
        }
    }
}

/// The lock runs on batteries only, so it never charges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ChargingState {
    #[default]
    NotCharging,
}

impl ChargingState {
    pub fn host_code(self) -> u8 {
        match self {
            Self::NotCharging => 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn percentage_stays_in_range_for_every_byte() {
        for raw in 0..=255u8 {
            let reading = BatteryReading::from_raw(f64::from(raw)).unwrap();
            assert!((0.0..=100.0).contains(&reading.percentage), "raw {raw}");
            assert_eq!(
                reading.low_battery_status() == LowBatteryStatus::Low,
                reading.percentage < 20.0
            );
        }
    }

    #[test]
    fn half_byte_is_about_fifty_percent() {
        let reading = BatteryReading::from_raw(128.0).unwrap();
        assert!((reading.percentage - 50.2).abs() < 0.01);
    }

    #[test]
    fn twenty_percent_boundary_is_normal() {
        let at = BatteryReading::from_raw(51.0).unwrap();
        assert!((at.percentage - 20.0).abs() < f64::EPSILON);
        assert_eq!(at.low_battery_status(), LowBatteryStatus::Normal);

        let below = BatteryReading::from_raw(50.0).unwrap();
        assert_eq!(below.low_battery_status(), LowBatteryStatus::Low);

        let above = BatteryReading::from_raw(51.1).unwrap();
        assert_eq!(above.low_battery_status(), LowBatteryStatus::Normal);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert!((BatteryReading::from_raw(300.0).unwrap().percentage - 100.0).abs() < f64::EPSILON);
        assert!(BatteryReading::from_raw(-4.0).unwrap().percentage.abs() < f64::EPSILON);
        assert!(BatteryReading::from_raw(f64::NAN).is_none());
    }

    #[test]
    fn after_reading_wins_over_before() {
        let status = LockStatus {
            battery_status_before: Some(255.0),
            battery_status_after: Some(0.0),
        };
        let reading = BatteryReading::from_status(&status).unwrap();
        assert!(reading.raw.abs() < f64::EPSILON);

        let only_before = LockStatus {
            battery_status_before: Some(255.0),
            battery_status_after: None,
        };
        assert!((BatteryReading::from_status(&only_before).unwrap().raw - 255.0).abs() < f64::EPSILON);

        assert!(BatteryReading::from_status(&LockStatus::default()).is_none());
    }
}
