// Hub endpoints
//
// Discovery (`GET /Hubs`) and the lock command endpoint
// (`POST /Hubs/{hubId}/Commands`).

use tracing::debug;

use crate::client::GlueClient;
use crate::error::Error;
use crate::models::{CommandRequest, CommandResponse, Hub, HubCommand};

impl GlueClient {
    /// List the hubs visible to the account, with their lock ids.
    ///
    /// `GET /Hubs`
    pub async fn list_hubs(&self) -> Result<Vec<Hub>, Error> {
        debug!("listing hubs");
        self.get(&["Hubs"]).await
    }

    /// Ask a hub to lock or unlock one of its locks.
    ///
    /// `POST /Hubs/{hubId}/Commands` with `{"LockId": ..., "HubCommand": "1"|"0"}`
    ///
    /// Not idempotent from the server's point of view and never retried here.
    /// The returned `Status` is passed through untouched; callers decide what
    /// a non-success status means.
    pub async fn issue_command(
        &self,
        hub_id: &str,
        lock_id: &str,
        command: HubCommand,
    ) -> Result<CommandResponse, Error> {
        debug!(hub_id, lock_id, %command, "issuing hub command");
        let body = CommandRequest {
            lock_id,
            hub_command: command,
        };
        self.post(&["Hubs", hub_id, "Commands"], &body).await
    }
}
