#![allow(clippy::unwrap_used)]
// Integration tests for `RestClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fortimap_api::{Error, FortiClient, Object, RestClient, response_mkey};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RestClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = RestClient::with_client(reqwest::Client::new(), base_url, "root".into());
    (server, client)
}

fn object(v: Value) -> Object {
    match v {
        Value::Object(m) => m,
        other => panic!("expected object, got {other}"),
    }
}

// ── Create / update ─────────────────────────────────────────────────

#[tokio::test]
async fn test_create_returns_mkey() {
    let (server, client) = setup().await;
    let payload = object(json!({ "name": "addr1", "type": "host-regex" }));

    Mock::given(method("POST"))
        .and(path("/api/v2/cmdb/firewall/proxy-address"))
        .and(query_param("vdom", "root"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "http_method": "POST",
            "status": "success",
            "http_status": 200,
            "mkey": "addr1",
            "vdom": "root",
            "version": "v7.4.1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .create("firewall/proxy-address", &payload, "root")
        .await
        .unwrap();
    assert_eq!(response_mkey(&resp).as_deref(), Some("addr1"));
}

#[tokio::test]
async fn test_bodies_are_traced() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let (server, client) = setup().await;
    let payload = object(json!({ "name": "addr1" }));
    Mock::given(method("PUT"))
        .and(path("/api/v2/cmdb/firewall/proxy-address/addr1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success", "http_status": 200, "mkey": "addr1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .update("firewall/proxy-address", &payload, "addr1", "root")
        .await
        .unwrap();
    assert_eq!(response_mkey(&resp).as_deref(), Some("addr1"));
}

#[tokio::test]
async fn test_update_singleton_without_key() {
    let (server, client) = setup().await;
    let payload = object(json!({ "default-metric": 2 }));

    Mock::given(method("PUT"))
        .and(path("/api/v2/cmdb/router/rip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "http_status": 200
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.update("router/rip", &payload, "", "").await.unwrap();
    assert_eq!(response_mkey(&resp), None);
}

#[tokio::test]
async fn test_create_error_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/cmdb/firewall/proxy-address"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "http_status": 500,
            "error": -5,
            "cli_error": "A duplicate entry already exists."
        })))
        .mount(&server)
        .await;

    let result = client
        .create("firewall/proxy-address", &Object::new(), "root")
        .await;
    match result {
        Err(Error::Api {
            status,
            code,
            message,
        }) => {
            assert_eq!(status, 500);
            assert_eq!(code, -5);
            assert_eq!(message, "A duplicate entry already exists.");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/router/rip"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.read("router/rip", "", "root").await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

// ── Read / list ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_read_table_entry() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/proxy-address/addr1"))
        .and(query_param("vdom", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "http_method": "GET",
            "status": "success",
            "http_status": 200,
            "results": [{ "name": "addr1", "type": "host-regex", "host-regex": ".*" }]
        })))
        .mount(&server)
        .await;

    let obj = client
        .read("firewall/proxy-address", "addr1", "root")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(obj.get("host-regex"), Some(&json!(".*")));
}

#[tokio::test]
async fn test_read_singleton_object_results() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/system/session-ttl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "http_status": 200,
            "results": { "default": "3600", "port": [] }
        })))
        .mount(&server)
        .await;

    let obj = client
        .read("system/session-ttl", "", "")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(obj.get("default"), Some(&json!("3600")));
}

#[tokio::test]
async fn test_read_not_found_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/firewall/proxy-address/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error",
            "http_status": 404
        })))
        .mount(&server)
        .await;

    let obj = client
        .read("firewall/proxy-address", "gone", "root")
        .await
        .unwrap();
    assert!(obj.is_none());
}

#[tokio::test]
async fn test_list_with_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/cmdb/vpn.ipsec/phase1-interface"))
        .and(query_param("filter", "name=@hq"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "http_status": 200,
            "results": [{ "name": "hq-1" }, { "name": "hq-2" }]
        })))
        .mount(&server)
        .await;

    let items = client
        .list("vpn.ipsec/phase1-interface", Some("name=@hq"), "root")
        .await
        .unwrap();
    let names: Vec<_> = items.iter().filter_map(|o| o.get("name")).collect();
    assert_eq!(names, vec![&json!("hq-1"), &json!("hq-2")]);
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_success() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/cmdb/firewall/proxy-address/addr1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "http_status": 200,
            "mkey": "addr1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete("firewall/proxy-address", "addr1", "root")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_missing_reports_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v2/cmdb/firewall/proxy-address/addr1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client
        .delete("firewall/proxy-address", "addr1", "root")
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
}

// ── Firmware probe ──────────────────────────────────────────────────

#[tokio::test]
async fn test_firmware_probe_is_cached() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/monitor/system/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "http_status": 200,
            "version": "v7.4.1",
            "build": 2463,
            "results": { "hostname": "FGT-LAB" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.firmware_version().await.unwrap(), "7.4.1");
    assert_eq!(client.firmware_version().await.unwrap(), "7.4.1");
}

#[tokio::test]
async fn test_pinned_firmware_skips_probe() {
    let (server, client) = setup().await;
    let client = client.with_firmware_version("7.2.8");

    Mock::given(method("GET"))
        .and(path("/api/v2/monitor/system/status"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert_eq!(client.firmware_version().await.unwrap(), "7.2.8");
}
