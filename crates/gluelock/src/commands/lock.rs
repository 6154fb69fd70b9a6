//! Lock and unlock.

use serde_json::json;

use gluelock_core::{HubCommand, LockAccessory, LockState};

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

pub async fn handle(
    accessory: &LockAccessory,
    command: HubCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    accessory.initialize().await;
    accessory.set_target_lock_state(command).await?;

    let state = LockState::from(command);
    util::emit(global, &json!({ "state": state }), |_| println!("{state}"))
}
