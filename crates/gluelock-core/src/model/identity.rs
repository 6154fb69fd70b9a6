// ── Device identity ──

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The hub/lock pair the accessory drives.
///
/// Either id may be unresolved (`None`). Empty strings are normalised to
/// `None` so "configured but blank" and "absent" behave the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    hub_id: Option<String>,
    lock_id: Option<String>,
}

impl DeviceIdentity {
    pub fn new(hub_id: Option<String>, lock_id: Option<String>) -> Self {
        Self {
            hub_id: non_empty(hub_id),
            lock_id: non_empty(lock_id),
        }
    }

    /// The hub id, or a resolution error when it is unknown.
    pub fn hub_id(&self) -> Result<&str, CoreError> {
        self.hub_id
            .as_deref()
            .ok_or(CoreError::Resolution { missing: "hub id" })
    }

    /// The lock id, or a resolution error when it is unknown.
    pub fn lock_id(&self) -> Result<&str, CoreError> {
        self.lock_id
            .as_deref()
            .ok_or(CoreError::Resolution { missing: "lock id" })
    }

    pub fn is_complete(&self) -> bool {
        self.hub_id.is_some() && self.lock_id.is_some()
    }
}

fn non_empty(id: Option<String>) -> Option<String> {
    id.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}
