// ── Event-type catalog cache ──
//
// Resolves opaque event-type ids to descriptors. Refreshed wholesale: a
// refresh swaps in a brand-new map, readers never see a half-built one.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::{debug, info};

use gluelock_api::{EventType, GlueClient};

use crate::error::CoreError;

/// Event-type id to descriptor.
pub type EventTypeCatalog = HashMap<String, EventType>;

pub struct EventTypeCache {
    client: Arc<GlueClient>,
    catalog: ArcSwapOption<EventTypeCatalog>,
}

impl EventTypeCache {
    pub fn new(client: Arc<GlueClient>) -> Self {
        Self {
            client,
            catalog: ArcSwapOption::empty(),
        }
    }

    /// Fetch the full catalog and replace the cached one.
    ///
    /// On failure the previous catalog (if any) stays in place.
    pub async fn refresh(&self) -> Result<Arc<EventTypeCatalog>, CoreError> {
        let types = self.client.list_event_types().await?;
        let catalog: EventTypeCatalog = types
            .into_iter()
            .map(|event_type| (event_type.id.clone(), event_type))
            .collect();
        let catalog = Arc::new(catalog);

        let previous = self.catalog.swap(Some(Arc::clone(&catalog)));
        if previous.is_none() {
            info!(count = catalog.len(), "event type catalog loaded");
        } else {
            debug!(count = catalog.len(), "event type catalog refreshed");
        }
        Ok(catalog)
    }

    /// Look up a descriptor. Unknown ids (or an unloaded catalog) yield `None`.
    pub fn lookup(&self, id: &str) -> Option<EventType> {
        self.catalog
            .load()
            .as_ref()
            .and_then(|catalog| catalog.get(id).cloned())
    }

    /// Whether at least one refresh has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.catalog.load().is_some()
    }

    /// The current catalog, if loaded.
    pub fn snapshot(&self) -> Option<Arc<EventTypeCatalog>> {
        self.catalog.load_full()
    }
}
