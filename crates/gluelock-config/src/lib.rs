//! Configuration for the gluelock binary.
//!
//! A flat TOML file, `GLUE_*` environment overrides, and translation to
//! `gluelock_core::AccessoryConfig`. Keys use the accessory's kebab-case
//! names (`hub-id`, `check-for-events-interval`, ...).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gluelock_core::AccessoryConfig;
use gluelock_core::config::{DEFAULT_CHECK_FOR_EVENTS_INTERVAL, DEFAULT_NAME, DEFAULT_TIMEOUT};

/// Prefix for environment overrides (`GLUE_USERNAME`, `GLUE_HUB_ID`, ...).
pub const ENV_PREFIX: &str = "GLUE_";

/// Keys whose environment values are taken verbatim rather than parsed,
/// so `GLUE_PASSWORD=123456` or `GLUE_LOCK_ID=0042` stay strings.
const VERBATIM_ENV_KEYS: &[&str] = &["username", "password", "hub-id", "lock-id"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {field} configured")]
    MissingCredentials { field: &'static str },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Everything the accessory can be configured with.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Display name of the accessory.
    #[serde(default = "default_name")]
    pub name: String,

    /// API base URL.
    #[serde(default = "default_url")]
    pub url: String,

    pub username: Option<String>,

    /// Never written back out.
    #[serde(default, skip_serializing)]
    pub password: Option<SecretString>,

    pub hub_id: Option<String>,

    pub lock_id: Option<String>,

    #[serde(default = "default_check_for_events")]
    pub check_for_events: bool,

    /// Seconds between two event polls.
    #[serde(default = "default_interval")]
    pub check_for_events_interval: u64,

    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: default_name(),
            url: default_url(),
            username: None,
            password: None,
            hub_id: None,
            lock_id: None,
            check_for_events: default_check_for_events(),
            check_for_events_interval: default_interval(),
            timeout: default_timeout(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_NAME.into()
}
fn default_url() -> String {
    gluelock_core::config::DEFAULT_URL.into()
}
fn default_check_for_events() -> bool {
    true
}
fn default_interval() -> u64 {
    DEFAULT_CHECK_FOR_EVENTS_INTERVAL.as_secs()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "gluelock", "gluelock").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("gluelock");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Build the layered figment: defaults, then the TOML file, then env.
pub fn figment(path: &Path) -> Figment {
    let verbatim: BTreeMap<String, String> = env()
        .only(VERBATIM_ENV_KEYS)
        .iter()
        .map(|(key, value)| (key.as_str().to_owned(), value))
        .collect();

    Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(env().ignore(VERBATIM_ENV_KEYS))
        .merge(Serialized::defaults(verbatim))
}

fn env() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| key.as_str().replace('_', "-").into())
}

/// Load settings from `path` (or the platform default) plus environment.
///
/// A missing file is not an error; every key has a default or is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let settings: Settings = figment(&path).extract()?;
    Ok(settings)
}

/// Serialize settings (without the password) to `path`.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(settings)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

impl Settings {
    /// Translate into the core accessory configuration.
    ///
    /// Credentials are mandatory; everything else falls back to defaults.
    pub fn to_accessory_config(&self) -> Result<AccessoryConfig, ConfigError> {
        let username = self
            .username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingCredentials { field: "username" })?;
        let password = self
            .password
            .clone()
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or(ConfigError::MissingCredentials { field: "password" })?;

        let url: url::Url = self.url.parse().map_err(|_| ConfigError::Validation {
            field: "url".into(),
            reason: format!("invalid URL: {}", self.url),
        })?;

        if self.check_for_events && self.check_for_events_interval == 0 {
            return Err(ConfigError::Validation {
                field: "check-for-events-interval".into(),
                reason: "must be at least one second".into(),
            });
        }

        let mut config = AccessoryConfig::new(username, password);
        config.name.clone_from(&self.name);
        config.url = url;
        config.hub_id.clone_from(&self.hub_id);
        config.lock_id.clone_from(&self.lock_id);
        config.check_for_events = self.check_for_events;
        config.check_for_events_interval = Duration::from_secs(self.check_for_events_interval);
        config.timeout = Duration::from_secs(self.timeout);
        Ok(config)
    }
}
