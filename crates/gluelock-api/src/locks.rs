// Lock endpoints

use tracing::debug;

use crate::client::GlueClient;
use crate::error::Error;
use crate::models::LockStatus;

impl GlueClient {
    /// Fetch the status record of a single lock.
    ///
    /// `GET /Locks/{lockId}`
    pub async fn get_lock(&self, lock_id: &str) -> Result<LockStatus, Error> {
        debug!(lock_id, "fetching lock status");
        self.get(&["Locks", lock_id]).await
    }
}
