// ── Lock state ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gluelock_api::HubCommand;

/// The accessory's notion of the physical lock position.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum LockState {
    Locked,
    Unlocked,
    #[default]
    Unknown,
}

impl LockState {
    /// Map a vendor event description to a state.
    ///
    /// Only "Locked" and "Unlocked" are recognised (case and surrounding
    /// whitespace ignored). Anything else is a decode miss.
    pub fn from_description(description: &str) -> Option<Self> {
        let description = description.trim();
        if description.eq_ignore_ascii_case("locked") {
            Some(Self::Locked)
        } else if description.eq_ignore_ascii_case("unlocked") {
            Some(Self::Unlocked)
        } else {
            None
        }
    }

    /// The vendor description for this state. `Unknown` has none.
    pub fn description(self) -> Option<&'static str> {
        match self {
            Self::Locked => Some("Locked"),
            Self::Unlocked => Some("Unlocked"),
            Self::Unknown => None,
        }
    }

    /// The command that drives the lock into this state.
    pub fn command(self) -> Option<HubCommand> {
        match self {
            Self::Locked => Some(HubCommand::Lock),
            Self::Unlocked => Some(HubCommand::Unlock),
            Self::Unknown => None,
        }
    }

    /// Host encoding: unsecured = 0, secured = 1, unknown = 3.
    pub fn host_code(self) -> u8 {
        match self {
            Self::Unlocked => 0,
            Self::Locked => 1,
            Self::Unknown => 3,
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl From<HubCommand> for LockState {
    fn from(command: HubCommand) -> Self {
        match command {
            HubCommand::Lock => Self::Locked,
            HubCommand::Unlock => Self::Unlocked,
        }
    }
}

/// Current state plus the instant of the last authoritative update.
///
/// `last_event_check` never decreases. Poll results older than or equal
/// to it are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSnapshot {
    pub state: LockState,
    pub last_event_check: DateTime<Utc>,
}

impl Default for LockSnapshot {
    fn default() -> Self {
        Self {
            state: LockState::Unknown,
            last_event_check: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_mapping_round_trips() {
        for state in [LockState::Locked, LockState::Unlocked] {
            let desc = state.description().unwrap_or_default();
            assert_eq!(LockState::from_description(desc), Some(state));
        }
        assert_eq!(LockState::Unknown.description(), None);
    }

    #[test]
    fn unrecognised_descriptions_are_misses() {
        assert_eq!(LockState::from_description(" locked "), Some(LockState::Locked));
        assert_eq!(LockState::from_description("Jammed"), None);
        assert_eq!(LockState::from_description(""), None);
    }

    #[test]
    fn host_codes() {
        assert_eq!(LockState::Unlocked.host_code(), 0);
        assert_eq!(LockState::Locked.host_code(), 1);
        assert_eq!(LockState::Unknown.host_code(), 3);
    }

    #[test]
    fn commands_map_to_states() {
        assert_eq!(LockState::from(HubCommand::Lock), LockState::Locked);
        assert_eq!(LockState::Unlocked.command(), Some(HubCommand::Unlock));
        assert_eq!(LockState::Unknown.command(), None);
    }

    #[test]
    fn initial_snapshot_is_unknown_at_epoch() {
        let snap = LockSnapshot::default();
        assert_eq!(snap.state, LockState::Unknown);
        assert_eq!(snap.last_event_check.timestamp(), 0);
    }
}
