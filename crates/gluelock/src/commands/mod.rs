//! Command dispatch: bridges CLI args to accessory operations.

pub mod config_cmd;
pub mod event_types;
pub mod hubs;
pub mod lock;
pub mod run;
pub mod status;
pub mod util;

use gluelock_core::{HubCommand, LockAccessory};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    accessory: &LockAccessory,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Run => run::handle(accessory).await,
        Command::Hubs => hubs::handle(accessory, global).await,
        Command::Status => status::handle(accessory, global).await,
        Command::Lock => lock::handle(accessory, HubCommand::Lock, global).await,
        Command::Unlock => lock::handle(accessory, HubCommand::Unlock, global).await,
        Command::EventTypes => event_types::handle(accessory, global).await,
        // Config is handled before dispatch
        Command::Config(_) => unreachable!(),
    }
}
