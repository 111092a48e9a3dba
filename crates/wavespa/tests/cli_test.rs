//! Integration tests for the `wavespa` CLI binary.
//!
//! Argument parsing, help and completions run without any server; the
//! end-to-end cases point `--api-root` at a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `wavespa` binary with env isolation.
///
/// Clears all `WAVESPA_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn wavespa_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("wavespa");
    cmd.env("HOME", "/tmp/wavespa-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/wavespa-cli-test-nonexistent")
        .env_remove("WAVESPA_PROFILE")
        .env_remove("WAVESPA_API_ROOT")
        .env_remove("WAVESPA_USERNAME")
        .env_remove("WAVESPA_PASSWORD")
        .env_remove("WAVESPA_OUTPUT")
        .env_remove("WAVESPA_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// A command already pointed at `server` with credentials in the env.
fn mocked_cmd(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = wavespa_cmd();
    cmd.env("WAVESPA_PASSWORD", "hunter2")
        .args(["--api-root", &server.uri(), "--username", "me@example.com"]);
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn device_json(did: &str, product_name: &str, alias: &str) -> serde_json::Value {
    json!({
        "protoc": 3,
        "did": did,
        "product_name": product_name,
        "dev_alias": alias,
        "mcu_soft_version": "M1.0",
        "mcu_hard_version": "H1.0",
        "wifi_soft_version": "W1.0",
        "wifi_hard_version": "WH1.0",
        "is_online": true
    })
}

/// Mock server with one Airjet spa ("garden") and one Hydrojet ("deck").
async fn spa_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": "user-1",
            "token": "token-1",
            "expire_at": 1_900_000_000
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/app/bindings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devices": [
                device_json("dev-a", "Wave_SPA_EU", "Garden"),
                device_json("dev-b", "Hydrojet", "Deck"),
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/app/devdata/dev-a/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updated_at": 1_700_000_000,
            "attr": {
                "Heater": 1, "Filter": 1, "Bubble": 0, "locked": 0,
                "Temperature_setup": 38, "Current_temperature": 30,
                "Time_filter": 5100
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/app/devdata/dev-b/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updated_at": 1_700_000_000,
            "attr": {
                "power": 1, "filter": 2, "heat": 0, "wave": 0,
                "Tset": 37, "Tnow": 36, "Tunit": 1, "word3": 0
            }
        })))
        .mount(&server)
        .await;

    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = wavespa_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    wavespa_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("hot tubs")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn test_version_flag() {
    wavespa_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wavespa"));
}

#[test]
fn test_set_subcommands_exist() {
    wavespa_cmd().args(["set", "--help"]).assert().success().stdout(
        predicate::str::contains("power")
            .and(predicate::str::contains("bubbles"))
            .and(predicate::str::contains("lock"))
            .and(predicate::str::contains("temp")),
    );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_zsh() {
    wavespa_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    wavespa_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = wavespa_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("foobar"));
}

#[test]
fn test_invalid_bubbles_level() {
    wavespa_cmd()
        .args(["set", "spa", "bubbles", "turbo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("turbo"));
}

#[test]
fn test_invalid_output_format() {
    wavespa_cmd()
        .args(["--output", "xml", "devices"])
        .assert()
        .code(2);
}

#[test]
fn test_devices_without_credentials() {
    wavespa_cmd()
        .arg("devices")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No credentials"));
}

#[test]
fn test_unknown_explicit_profile() {
    wavespa_cmd()
        .args(["--profile", "cabin", "devices"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cabin"));
}

// ── Against a mock cloud ────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_login_prints_user() {
    let server = spa_server().await;

    mocked_cmd(&server)
        .args(["--output", "json", "login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"user_id\": \"user-1\"").and(predicate::str::contains("token-1").not()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_bad_password_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/app/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error_code": 9020})))
        .mount(&server)
        .await;

    mocked_cmd(&server).arg("login").assert().code(3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_plain_lists_ids() {
    let server = spa_server().await;

    mocked_cmd(&server)
        .args(["--output", "plain", "devices"])
        .assert()
        .success()
        .stdout("dev-a\ndev-b\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_json_decodes_state() {
    let server = spa_server().await;

    let output = mocked_cmd(&server)
        .args(["--output", "json", "status", "garden"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let views: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(views[0]["device_id"], "dev-a");
    assert_eq!(views[0]["state"]["heating"], true);
    assert_eq!(views[0]["filter_percent"], 50);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_power_off_sends_cascade() {
    let server = spa_server().await;
    Mock::given(method("POST"))
        .and(path("/app/control/dev-b"))
        .and(body_json(json!({"attrs": {"power": 0}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let output = mocked_cmd(&server)
        .args(["--output", "json", "set", "dev-b", "power", "off"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let views: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(views[0]["state"]["power"], false);
    assert_eq!(views[0]["state"]["filter"], false);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_lock_on_hydrojet_is_unsupported() {
    let server = spa_server().await;

    mocked_cmd(&server)
        .args(["set", "deck", "lock", "on"])
        .assert()
        .code(5);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_temperature_out_of_range() {
    let server = spa_server().await;

    mocked_cmd(&server)
        .args(["set", "garden", "temp", "45"])
        .assert()
        .code(2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_unknown_device() {
    let server = spa_server().await;

    mocked_cmd(&server)
        .args(["set", "pool", "power", "on"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("pool"));
}
