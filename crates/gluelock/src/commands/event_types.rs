//! Event-type catalog listing.

use gluelock_core::LockAccessory;

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

pub async fn handle(accessory: &LockAccessory, global: &GlobalOpts) -> Result<(), CliError> {
    let catalog = accessory.event_types().refresh().await?;
    let mut types: Vec<_> = catalog.values().cloned().collect();
    types.sort_by(|a, b| a.id.cmp(&b.id));

    util::emit(global, &types, |types| {
        for event_type in types {
            println!("{}\t{}", event_type.id, event_type.description);
        }
    })
}
