//! Integration tests for the `gluelock` CLI binary.
//!
//! Argument parsing and error paths run without any server; API-bound
//! commands run against a wiremock stand-in for the Glue cloud.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `gluelock` binary with env isolation.
///
/// Clears all `GLUE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn gluelock_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("gluelock");
    cmd.env("HOME", "/tmp/gluelock-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/gluelock-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("GLUE_CONFIG")
        .env_remove("GLUE_USERNAME")
        .env_remove("GLUE_PASSWORD")
        .env_remove("GLUE_HUB_ID")
        .env_remove("GLUE_LOCK_ID")
        .env_remove("GLUE_URL")
        .env_remove("GLUE_CHECK_FOR_EVENTS")
        .env_remove("GLUE_CHECK_FOR_EVENTS_INTERVAL");
    cmd
}

/// A command wired to `server` with credentials and a pinned device.
fn api_cmd(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = gluelock_cmd();
    cmd.env("GLUE_USERNAME", "alice")
        .env("GLUE_PASSWORD", "hunter2")
        .args(["--url", &format!("{}/api", server.uri())]);
    cmd
}

/// Run a blocking command off the async test runtime.
async fn output(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn mount_basics(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/EventTypes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "Id": "1", "Description": "Locked" },
            { "Id": "2", "Description": "Unlocked" }
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/Events/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "LockEvent": [] })))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = gluelock_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    gluelock_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("hubs")
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("unlock"))
            .and(predicate::str::contains("event-types")),
    );
}

#[test]
fn test_version_flag() {
    gluelock_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gluelock"));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_credentials_exit_code() {
    let output = gluelock_cmd().arg("status").output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("username"), "output:\n{text}");
}

#[test]
fn test_missing_password_names_the_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "username = \"alice\"\n").unwrap();

    let output = gluelock_cmd()
        .args(["--config", config.to_str().unwrap(), "lock"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("password"), "output:\n{text}");
    assert!(text.contains("config.toml"), "output:\n{text}");
}

#[test]
fn test_config_path_honours_flag() {
    gluelock_cmd()
        .args(["--config", "/tmp/elsewhere/gluelock.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/elsewhere/gluelock.toml"));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let config_arg = config.to_str().unwrap();

    gluelock_cmd()
        .args(["--config", config_arg, "--lock-id", "L7", "config", "init", "--username", "alice"])
        .assert()
        .success();
    assert!(Path::new(&config).exists());

    gluelock_cmd()
        .args(["--config", config_arg, "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("alice")
                .and(predicate::str::contains("L7"))
                .and(predicate::str::contains("(unset)")),
        );

    let output = gluelock_cmd()
        .args(["--config", config_arg, "config", "init", "--username", "bob"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── API-bound commands ──────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_hubs_lists_locks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Hubs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "Id": "H1", "LockIds": ["L1", "L2"] }
        ])))
        .mount(&server)
        .await;

    let out = output({
        let mut cmd = api_cmd(&server);
        cmd.arg("hubs");
        cmd
    })
    .await;

    assert!(out.status.success(), "{}", combined_output(&out));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("H1"));
    assert!(stdout.contains("L1, L2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lock_sends_hub_command() {
    let server = MockServer::start().await;
    mount_basics(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/Hubs/H1/Commands"))
        .and(body_json(json!({ "LockId": "L1", "HubCommand": "1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Status": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let out = output({
        let mut cmd = api_cmd(&server);
        cmd.args(["--hub-id", "H1", "--lock-id", "L1", "lock"]);
        cmd
    })
    .await;

    assert!(out.status.success(), "{}", combined_output(&out));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Locked"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_unlock_fails() {
    let server = MockServer::start().await;
    mount_basics(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/Hubs/H1/Commands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Status": 0 })))
        .mount(&server)
        .await;

    let out = output({
        let mut cmd = api_cmd(&server);
        cmd.args(["--hub-id", "H1", "--lock-id", "L1", "unlock"]);
        cmd
    })
    .await;

    assert_eq!(out.status.code(), Some(1));
    assert!(combined_output(&out).contains("error setting lock state"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_as_json() {
    let server = MockServer::start().await;
    mount_basics(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/Locks/L1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "BatteryStatusAfter": 255 })))
        .mount(&server)
        .await;

    let out = output({
        let mut cmd = api_cmd(&server);
        cmd.args(["--hub-id", "H1", "--lock-id", "L1", "--output", "json", "status"]);
        cmd
    })
    .await;

    assert!(out.status.success(), "{}", combined_output(&out));
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["lock_id"], "L1");
    assert_eq!(report["state"], "Unknown");
    assert_eq!(report["battery_percentage"], 100.0);
    assert_eq!(report["low_battery"], "Normal");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_maps_to_auth_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Hubs"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let out = output({
        let mut cmd = api_cmd(&server);
        cmd.arg("hubs");
        cmd
    })
    .await;

    assert_eq!(out.status.code(), Some(3), "{}", combined_output(&out));
}
