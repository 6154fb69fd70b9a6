//! Settings resolution for the CLI: config file + env, then flag overrides.

use std::path::PathBuf;
use std::sync::Arc;

use gluelock_config::{ConfigError, Settings};
use gluelock_core::{AccessoryHost, LockAccessory, NoopHost};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::host::LoggingHost;

/// The config file this invocation reads.
pub fn effective_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(gluelock_config::config_path)
}

/// Load settings and apply `--url`, `--hub-id` and `--lock-id`.
pub fn load(global: &GlobalOpts) -> Result<Settings, CliError> {
    let path = effective_path(global);
    let mut settings = gluelock_config::load_settings(Some(&path))?;

    if let Some(ref url) = global.url {
        settings.url.clone_from(url);
    }
    if global.hub_id.is_some() {
        settings.hub_id.clone_from(&global.hub_id);
    }
    if global.lock_id.is_some() {
        settings.lock_id.clone_from(&global.lock_id);
    }
    Ok(settings)
}

/// Build the accessory. Only the daemon reports updates to a host.
pub fn build_accessory(global: &GlobalOpts, daemon: bool) -> Result<LockAccessory, CliError> {
    let settings = load(global)?;
    let config = settings.to_accessory_config().map_err(|err| match err {
        ConfigError::MissingCredentials { field } => CliError::NoCredentials {
            field,
            path: effective_path(global).display().to_string(),
        },
        other => other.into(),
    })?;

    let host: Arc<dyn AccessoryHost> = if daemon {
        Arc::new(LoggingHost::new(config.name.clone()))
    } else {
        Arc::new(NoopHost)
    };
    Ok(LockAccessory::new(config, host)?)
}
