//! Hub discovery.

use gluelock_core::{CoreError, LockAccessory};

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

pub async fn handle(accessory: &LockAccessory, global: &GlobalOpts) -> Result<(), CliError> {
    let hubs = accessory
        .client()
        .list_hubs()
        .await
        .map_err(CoreError::from)?;

    util::emit(global, &hubs, |hubs| {
        if hubs.is_empty() {
            println!("No hubs found for this account");
        }
        for hub in hubs {
            let locks = if hub.lock_ids.is_empty() {
                "(no locks)".to_owned()
            } else {
                hub.lock_ids.join(", ")
            };
            println!("{}\t{locks}", hub.id);
        }
    })
}
