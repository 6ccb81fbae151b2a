#![allow(clippy::unwrap_used)]
// Integration tests for `LibreNmsClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portsync_api::librenms::models::PORT_COLUMNS;
use portsync_api::{Error, LibreNmsClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, LibreNmsClient) {
    let server = MockServer::start().await;
    let client =
        LibreNmsClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());
    (server, client)
}

// ── Ports ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_ports_preserves_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/42/ports"))
        .and(query_param("columns", PORT_COLUMNS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "ports": [
                {
                    "port_id": 900,
                    "device_id": 42,
                    "ifName": "eth0.10",
                    "ifDescr": "eth0.10",
                    "ifAlias": "mgmt vlan",
                    "ifType": "l2vlan",
                    "ifSpeed": 1_000_000_000u64,
                    "ifDuplex": null,
                    "ifPhysAddress": "001122aabbcc"
                },
                {
                    "port_id": 901,
                    "device_id": 42,
                    "ifName": "eth0",
                    "ifType": "ethernetCsmacd",
                    "ifSpeed": 1_000_000_000u64,
                    "ifDuplex": "fullDuplex"
                }
            ]
        })))
        .mount(&server)
        .await;

    let ports = client.list_ports(42).await.unwrap();

    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0].if_name.as_deref(), Some("eth0.10"));
    assert_eq!(ports[0].if_type.as_deref(), Some("l2vlan"));
    assert_eq!(ports[0].if_phys_address.as_deref(), Some("001122aabbcc"));
    assert_eq!(ports[1].if_name.as_deref(), Some("eth0"));
    assert_eq!(ports[1].if_duplex.as_deref(), Some("fullDuplex"));
    assert!(ports[1].if_alias.is_none());
}

#[tokio::test]
async fn test_list_ports_empty_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/7/ports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok", "ports": [] })))
        .mount(&server)
        .await;

    let err = client.list_ports(7).await.unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got {err:?}");
}

#[tokio::test]
async fn test_list_ports_error_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/7/ports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "Invalid columns"
        })))
        .mount(&server)
        .await;

    let err = client.list_ports(7).await.unwrap_err();
    assert!(
        matches!(err, Error::Api { ref message, .. } if message == "Invalid columns"),
        "got {err:?}"
    );
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_device_404() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/3"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": "error",
            "message": "Device 3 does not exist"
        })))
        .mount(&server)
        .await;

    let err = client.get_device(3).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_get_device_rejects_multiple() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "count": 2,
            "devices": [{ "device_id": 3 }, { "device_id": 4 }]
        })))
        .mount(&server)
        .await;

    let err = client.get_device(3).await.unwrap_err();
    assert!(matches!(err, Error::Ambiguous { id: 3, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_add_device_returns_new_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/devices"))
        .and(body_json(json!({ "hostname": "10.0.0.9", "ping_fallback": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "message": "Device 10.0.0.9 (77) has been added successfully",
            "devices": [{ "device_id": 77, "hostname": "10.0.0.9" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.add_device("10.0.0.9").await.unwrap(), 77);
}

#[tokio::test]
async fn test_add_device_surfaces_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v0/devices"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "message": "Could not ping 10.0.0.9"
        })))
        .mount(&server)
        .await;

    let err = client.add_device("10.0.0.9").await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Could not ping 10.0.0.9");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ── IP address cache ────────────────────────────────────────────────

#[tokio::test]
async fn test_ip_table_is_loaded_once() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/resources/ip/addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "ip_addresses": [
                { "ipv4_address": "10.0.0.1", "ipv4_prefixlen": 24, "port_id": 900 },
                { "ipv4_address": "10.0.1.1", "ipv4_prefixlen": 24, "port_id": 901 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v0/ports/901"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "port": [{ "port_id": 901, "device_id": 42, "ifName": "eth1" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "count": 1,
            "devices": [{ "device_id": 42, "hostname": "10.0.1.1", "sysName": "edge-rtr1" }]
        })))
        .mount(&server)
        .await;

    let device = client.get_device_by_ip("10.0.1.1").await.unwrap();
    assert_eq!(device.device_id, 42);
    assert_eq!(device.sys_name.as_deref(), Some("edge-rtr1"));

    let err = client.find_port_for_ip("192.0.2.1").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_auth_token_header() {
    let server = MockServer::start().await;
    let token: secrecy::SecretString = "s3cr3t".to_string().into();
    let client = LibreNmsClient::new(
        Url::parse(&server.uri()).unwrap(),
        &token,
        &TransportConfig::default(),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/1"))
        .and(header("x-auth-token", "s3cr3t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "devices": [{ "device_id": 1 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let device = client.get_device(1).await.unwrap();
    assert_eq!(device.device_id, 1);
}
