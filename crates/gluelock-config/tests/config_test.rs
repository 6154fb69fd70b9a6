#![allow(clippy::unwrap_used)]
// Tests for layered settings loading.

use std::path::Path;
use std::time::Duration;

use figment::Jail;
use secrecy::{ExposeSecret, SecretString};

use gluelock_config::{ConfigError, Settings, load_settings, save_settings};

fn load(jail: &Jail) -> Settings {
    load_settings(Some(&jail.directory().join("config.toml"))).unwrap()
}

#[test]
fn test_defaults_without_file() {
    Jail::expect_with(|jail| {
        let settings = load(jail);
        assert_eq!(settings.name, "Glue Lock");
        assert_eq!(settings.url, "https://api.gluehome.com/api");
        assert!(settings.check_for_events);
        assert_eq!(settings.check_for_events_interval, 10);
        assert_eq!(settings.timeout, 30);
        assert!(settings.username.is_none());
        assert!(settings.password.is_none());
        Ok(())
    });
}

#[test]
fn test_toml_file_uses_kebab_case_keys() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
                name = "Front Door"
                username = "alice"
                password = "hunter2"
                hub-id = "H1"
                lock-id = "L1"
                check-for-events = false
                check-for-events-interval = 30
            "#,
        )?;

        let settings = load(jail);
        assert_eq!(settings.name, "Front Door");
        assert_eq!(settings.hub_id.as_deref(), Some("H1"));
        assert_eq!(settings.lock_id.as_deref(), Some("L1"));
        assert!(!settings.check_for_events);
        assert_eq!(settings.check_for_events_interval, 30);
        assert_eq!(settings.password.as_ref().map(|p| p.expose_secret()), Some("hunter2"));
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "username = \"alice\"\nhub-id = \"H1\"\n")?;
        jail.set_env("GLUE_USERNAME", "bob");
        jail.set_env("GLUE_HUB_ID", "H9");
        jail.set_env("GLUE_CHECK_FOR_EVENTS_INTERVAL", "5");

        let settings = load(jail);
        assert_eq!(settings.username.as_deref(), Some("bob"));
        assert_eq!(settings.hub_id.as_deref(), Some("H9"));
        assert_eq!(settings.check_for_events_interval, 5);
        Ok(())
    });
}

#[test]
fn test_numeric_environment_values_stay_strings() {
    Jail::expect_with(|jail| {
        jail.set_env("GLUE_USERNAME", "alice");
        jail.set_env("GLUE_PASSWORD", "123456");
        jail.set_env("GLUE_HUB_ID", "0042");
        jail.set_env("GLUE_LOCK_ID", "4711");

        let settings = load(jail);
        assert_eq!(settings.password.as_ref().map(|p| p.expose_secret()), Some("123456"));
        assert_eq!(settings.hub_id.as_deref(), Some("0042"));
        assert_eq!(settings.lock_id.as_deref(), Some("4711"));

        let config = settings.to_accessory_config().unwrap();
        assert_eq!(config.username, "alice");
        assert_eq!(config.lock_id.as_deref(), Some("4711"));
        Ok(())
    });
}

#[test]
fn test_malformed_file_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "timeout = \"soon\"")?;
        let result = load_settings(Some(&jail.directory().join("config.toml")));
        assert!(matches!(result, Err(ConfigError::Figment(_))), "got: {result:?}");
        Ok(())
    });
}

fn settings(user: Option<&str>, pass: Option<&str>) -> Settings {
    Settings {
        username: user.map(str::to_owned),
        password: pass.map(|p| SecretString::from(p.to_owned())),
        ..Settings::default()
    }
}

#[test]
fn test_translation_requires_credentials() {
    let err = settings(None, Some("p")).to_accessory_config().unwrap_err();
    assert!(matches!(err, ConfigError::MissingCredentials { field: "username" }));

    let err = settings(Some("u"), None).to_accessory_config().unwrap_err();
    assert!(matches!(err, ConfigError::MissingCredentials { field: "password" }));

    let err = settings(Some("  "), Some("p")).to_accessory_config().unwrap_err();
    assert!(matches!(err, ConfigError::MissingCredentials { field: "username" }));
}

#[test]
fn test_translation_carries_every_field() {
    let mut s = settings(Some("alice"), Some("hunter2"));
    s.hub_id = Some("H1".into());
    s.check_for_events_interval = 3;
    s.timeout = 7;

    let config = s.to_accessory_config().unwrap();
    assert_eq!(config.username, "alice");
    assert_eq!(config.hub_id.as_deref(), Some("H1"));
    assert!(config.lock_id.is_none());
    assert_eq!(config.check_for_events_interval, Duration::from_secs(3));
    assert_eq!(config.timeout, Duration::from_secs(7));
    assert_eq!(config.url.as_str(), "https://api.gluehome.com/api");
}

#[test]
fn test_translation_rejects_bad_url_and_zero_interval() {
    let mut s = settings(Some("u"), Some("p"));
    s.url = "not a url".into();
    assert!(matches!(
        s.to_accessory_config(),
        Err(ConfigError::Validation { ref field, .. }) if field == "url"
    ));

    let mut s = settings(Some("u"), Some("p"));
    s.check_for_events_interval = 0;
    assert!(s.to_accessory_config().is_err());
    s.check_for_events = false;
    assert!(s.to_accessory_config().is_ok());
}

#[test]
fn test_saved_settings_omit_the_password() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("nested").join("config.toml");
        let mut s = settings(Some("alice"), Some("hunter2"));
        s.lock_id = Some("L1".into());

        save_settings(&s, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("lock-id = \"L1\""));
        assert!(!written.contains("hunter2"));
        assert!(!written.contains("password"));

        let reloaded = load_settings(Some(Path::new(&path))).unwrap();
        assert_eq!(reloaded.username.as_deref(), Some("alice"));
        assert!(reloaded.password.is_none());
        Ok(())
    });
}
