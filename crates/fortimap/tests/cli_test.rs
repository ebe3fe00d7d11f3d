//! Integration tests for the `fortimap` CLI binary.
//!
//! Offline commands run as-is; device commands run against a wiremock
//! server standing in for the FortiGate REST API.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `fortimap` binary with env isolation.
///
/// Clears all `FORTIMAP_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn fortimap_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("fortimap");
    cmd.env("HOME", "/tmp/fortimap-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/fortimap-cli-test-nonexistent")
        .env_remove("FORTIMAP_PROFILE")
        .env_remove("FORTIMAP_HOST")
        .env_remove("FORTIMAP_TOKEN")
        .env_remove("FORTIMAP_VDOM")
        .env_remove("FORTIMAP_OUTPUT")
        .env_remove("FORTIMAP_INSECURE")
        .env_remove("FORTIMAP_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

async fn mock_status(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/monitor/system/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "http_status": 200,
            "version": "v7.4.1",
            "results": { "hostname": "FGT-LAB" }
        })))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = fortimap_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    fortimap_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("FortiOS")
            .and(predicate::str::contains("payload"))
            .and(predicate::str::contains("apply"))
            .and(predicate::str::contains("destroy")),
    );
}

#[test]
fn test_version_flag() {
    fortimap_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fortimap"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_zsh() {
    fortimap_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Catalog ─────────────────────────────────────────────────────────

#[test]
fn test_resources_plain_lists_every_type() {
    fortimap_cmd()
        .args(["resources", "-o", "plain"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("firewall_proxyaddress")
                .and(predicate::str::contains("router_rip"))
                .and(predicate::str::contains("voip_profile")),
        );
}

#[test]
fn test_schema_shows_nested_paths() {
    fortimap_cmd()
        .args(["schema", "emailfilter-blockallowlist", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entries.ip4_subnet"));
}

#[test]
fn test_unknown_resource_exits_not_found() {
    let output = fortimap_cmd().args(["schema", "router_ospf"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("router_ospf"), "{text}");
}

// ── Payload preview ─────────────────────────────────────────────────

#[test]
fn test_payload_translates_keys_and_subnets() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("list.json");
    write_json(
        &cfg,
        &json!({
            "name": "blocked",
            "entries": [{ "id": 1, "type": "ip", "ip4_subnet": "10.0.0.0/24", "addr_type": "ipv4" }]
        }),
    );

    let output = fortimap_cmd()
        .args(["payload", "emailfilter_blockallowlist", "-o", "json-compact", "-f"])
        .arg(&cfg)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["entries"][0]["ip4-subnet"], "10.0.0.0/24");
    assert_eq!(body["entries"][0]["addr-type"], "ipv4");
    assert!(body.get("id").is_none());
}

#[test]
fn test_payload_version_mismatch_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("voip.json");
    write_json(&cfg, &json!({ "name": "sip", "codec": 3 }));

    let output = fortimap_cmd()
        .args(["payload", "voip_profile", "--firmware", "7.4.1", "-f"])
        .arg(&cfg)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("codec"), "{text}");
}

#[test]
fn test_payload_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("addr.json");
    write_json(&cfg, &json!({ "name": "hq", "type": "nope" }));

    fortimap_cmd()
        .args(["payload", "firewall_proxyaddress", "-f"])
        .arg(&cfg)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("type"));
}

// ── Device commands ─────────────────────────────────────────────────

#[test]
fn test_device_command_without_config() {
    let output = fortimap_cmd()
        .args(["list", "firewall_proxyaddress"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("No device configured"), "{text}");
}

#[test]
fn test_destroy_untracked_state() {
    let dir = tempfile::tempdir().unwrap();
    fortimap_cmd()
        .args(["destroy", "firewall_proxyaddress", "--host", "127.0.0.1", "--token", "t", "-s"])
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("does not track an object"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_apply_then_destroy_round_trip() {
    let server = MockServer::start().await;
    mock_status(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v2/cmdb/firewall/proxy-address"))
        .and(query_param("vdom", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "http_status": 200, "mkey": "hq"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/proxy-address/hq"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "http_status": 200,
            "results": [{
                "name": "hq",
                "uuid": "5a1c7e52-0000-0000-0000-000000000000",
                "type": "host-regex",
                "host-regex": "^hq\\.example\\.com$"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/cmdb/firewall/proxy-address/hq"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "http_status": 200, "mkey": "hq"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("hq.json");
    let state = dir.path().join("hq.state.json");
    write_json(
        &cfg,
        &json!({ "name": "hq", "type": "host-regex", "host_regex": "^hq\\.example\\.com$" }),
    );

    let mut apply = fortimap_cmd();
    apply
        .args(["apply", "firewall_proxyaddress", "-o", "json", "--vdom", "root", "--token", "t"])
        .args(["--host", &server.uri()])
        .arg("-f")
        .arg(&cfg)
        .arg("-s")
        .arg(&state);
    let output = run_blocking(apply).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&state).unwrap()).unwrap();
    assert_eq!(saved["id"], "hq");
    assert_eq!(saved["attributes"]["host_regex"], "^hq\\.example\\.com$");
    assert_eq!(saved["attributes"]["uuid"], "5a1c7e52-0000-0000-0000-000000000000");
    assert_eq!(saved["attributes"]["vdomparam"], "root");
    assert_eq!(saved["applied"]["host_regex"], "^hq\\.example\\.com$");
    assert!(saved["applied"].get("uuid").is_none());

    let mut destroy = fortimap_cmd();
    destroy
        .args(["destroy", "firewall_proxyaddress", "--token", "t"])
        .args(["--host", &server.uri()])
        .arg("-s")
        .arg(&state);
    let output = run_blocking(destroy).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(!state.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_token_exits_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut list = fortimap_cmd();
    list.args(["list", "firewall_proxyaddress", "--token", "bad"])
        .args(["--host", &server.uri()]);
    let output = run_blocking(list).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}
