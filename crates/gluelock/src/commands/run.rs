//! Long-running accessory daemon.

use gluelock_core::LockAccessory;
use tracing::info;

use crate::error::CliError;

pub async fn handle(accessory: &LockAccessory) -> Result<(), CliError> {
    accessory.start().await;
    info!(state = %accessory.get_current_lock_state(), "running; press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    accessory.shutdown().await;
    Ok(())
}
