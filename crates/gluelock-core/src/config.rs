// ── Runtime accessory configuration ──
//
// Describes *how* to reach the Glue API and which lock to drive.
// Carries credentials and polling tuning, never touches disk: the binary
// (or any other host) builds an `AccessoryConfig` and hands it in.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::CoreError;

pub const DEFAULT_NAME: &str = "Glue Lock";
pub const DEFAULT_URL: &str = gluelock_api::DEFAULT_BASE_URL;
pub const DEFAULT_CHECK_FOR_EVENTS_INTERVAL: Duration = Duration::from_secs(10);
pub const EVENT_TYPES_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a single lock accessory.
#[derive(Debug, Clone)]
pub struct AccessoryConfig {
    /// Display name of the accessory.
    pub name: String,
    /// API base URL (defaults to the vendor's production endpoint).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    /// Hub to command. Discovered at startup when `None`.
    pub hub_id: Option<String>,
    /// Lock to drive. Discovered at startup when `None`.
    pub lock_id: Option<String>,
    /// Poll the event feed in the background.
    pub check_for_events: bool,
    /// Delay between two reconciliation ticks.
    pub check_for_events_interval: Duration,
    /// Delay between two event-type catalog refreshes.
    pub event_types_refresh_interval: Duration,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl AccessoryConfig {
    /// Build a config with every optional setting at its default.
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            name: DEFAULT_NAME.into(),
            url: default_url(),
            username: username.into(),
            password,
            hub_id: None,
            lock_id: None,
            check_for_events: true,
            check_for_events_interval: DEFAULT_CHECK_FOR_EVENTS_INTERVAL,
            event_types_refresh_interval: EVENT_TYPES_REFRESH_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reject configurations the accessory cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        let no_user = self.username.trim().is_empty();
        let no_pass = self.password.expose_secret().is_empty();
        let missing = match (no_user, no_pass) {
            (true, true) => Some("config requires a username and password"),
            (true, false) => Some("config requires a username"),
            (false, true) => Some("config requires a password"),
            (false, false) => None,
        };
        if let Some(message) = missing {
            return Err(CoreError::config(message));
        }

        if self.check_for_events && self.check_for_events_interval.is_zero() {
            return Err(CoreError::config(
                "check-for-events-interval must be at least one second",
            ));
        }
        if self.event_types_refresh_interval.is_zero() {
            return Err(CoreError::config("event type refresh interval must be non-zero"));
        }
        Ok(())
    }
}

fn default_url() -> Url {
    // The constant is a valid absolute URL.
    Url::parse(DEFAULT_URL).expect("default base URL is valid")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(user: &str, pass: &str) -> AccessoryConfig {
        AccessoryConfig::new(user, SecretString::from(pass.to_string()))
    }

    #[test]
    fn defaults_match_the_vendor_setup() {
        let cfg = config("u", "p");
        assert_eq!(cfg.name, "Glue Lock");
        assert_eq!(cfg.url.as_str(), "https://api.gluehome.com/api");
        assert!(cfg.check_for_events);
        assert_eq!(cfg.check_for_events_interval, Duration::from_secs(10));
        assert_eq!(cfg.event_types_refresh_interval, Duration::from_secs(3600));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_credentials_are_rejected() {
        for (user, pass, needle) in [
            ("", "", "username and password"),
            ("", "p", "username"),
            ("u", "", "password"),
        ] {
            let err = config(user, pass).validate().unwrap_err();
            assert!(err.to_string().contains(needle), "{err}");
        }
    }

    #[test]
    fn zero_poll_interval_is_rejected_only_when_polling() {
        let mut cfg = config("u", "p");
        cfg.check_for_events_interval = Duration::ZERO;
        assert!(cfg.validate().is_err());
        cfg.check_for_events = false;
        assert!(cfg.validate().is_ok());
    }
}
