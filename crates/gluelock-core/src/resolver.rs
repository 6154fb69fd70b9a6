// ── Hub / lock discovery ──

use std::sync::Arc;

use tracing::{info, warn};

use gluelock_api::{GlueClient, Hub};

use crate::model::DeviceIdentity;

/// Discovers hub and lock ids when they are not configured.
pub struct DeviceResolver {
    client: Arc<GlueClient>,
}

impl DeviceResolver {
    pub fn new(client: Arc<GlueClient>) -> Self {
        Self { client }
    }

    /// Resolve the identity to drive.
    ///
    /// With both ids configured this returns them untouched without any
    /// request. Otherwise the hub list is fetched and logged, and missing
    /// ids are filled from it. Never fails: on error the missing ids stay
    /// unresolved and callers must treat the device as not ready.
    pub async fn resolve(&self, hub_id: Option<&str>, lock_id: Option<&str>) -> DeviceIdentity {
        let configured = DeviceIdentity::new(hub_id.map(str::to_owned), lock_id.map(str::to_owned));
        if configured.is_complete() {
            return configured;
        }

        let hubs = match self.client.list_hubs().await {
            Ok(hubs) => hubs,
            Err(e) => {
                warn!(
                    error = %e,
                    url = %self.client.base_url(),
                    "hub discovery failed; lock stays unresolved"
                );
                return configured;
            }
        };

        info!("available hubs and locks:");
        for hub in &hubs {
            info!(hub_id = %hub.id, lock_ids = ?hub.lock_ids, "discovered hub");
        }

        let resolved = select_identity(&hubs, hub_id, lock_id);
        match (resolved.hub_id(), resolved.lock_id()) {
            (Ok(hub), Ok(lock)) => info!(
                "using hub {hub} and lock {lock}; pin them with hub-id = \"{hub}\" and lock-id = \"{lock}\""
            ),
            _ => warn!("no usable hub/lock pair found for this account"),
        }
        resolved
    }
}

/// Fill the unconfigured ids from a hub listing.
///
/// A configured id is never replaced. A configured lock selects the hub
/// that owns it; a configured hub contributes its first lock; with
/// nothing configured the first hub and its first lock win.
pub fn select_identity(hubs: &[Hub], hub_id: Option<&str>, lock_id: Option<&str>) -> DeviceIdentity {
    let configured = DeviceIdentity::new(hub_id.map(str::to_owned), lock_id.map(str::to_owned));
    let hub_id = configured.hub_id().ok();
    let lock_id = configured.lock_id().ok();

    let hub = match (hub_id, lock_id) {
        (Some(hub_id), _) => hubs.iter().find(|h| h.id == hub_id),
        (None, Some(lock_id)) => hubs
            .iter()
            .find(|h| h.lock_ids.iter().any(|l| l == lock_id))
            .or_else(|| hubs.first()),
        (None, None) => hubs.first(),
    };

    let hub_id = hub_id.map(str::to_owned).or_else(|| hub.map(|h| h.id.clone()));
    let lock_id = lock_id
        .map(str::to_owned)
        .or_else(|| hub.and_then(|h| h.lock_ids.first().cloned()));

    DeviceIdentity::new(hub_id, lock_id)
}
