// Event endpoints
//
// The event-type catalog and the recent lock-event feed. The feed has no
// cursor: every call returns whatever the server considers recent.

use tracing::debug;

use crate::client::GlueClient;
use crate::error::Error;
use crate::models::{EventType, EventsResponse, LockEvent};

impl GlueClient {
    /// Fetch the full event-type catalog.
    ///
    /// `GET /EventTypes`
    pub async fn list_event_types(&self) -> Result<Vec<EventType>, Error> {
        debug!("listing event types");
        self.get(&["EventTypes"]).await
    }

    /// Fetch recent lock events, in server order.
    ///
    /// `GET /Events/`
    pub async fn list_events(&self) -> Result<Vec<LockEvent>, Error> {
        debug!("listing events");
        let resp: EventsResponse = self.get(&["Events", ""]).await?;
        Ok(resp.lock_event)
    }
}
