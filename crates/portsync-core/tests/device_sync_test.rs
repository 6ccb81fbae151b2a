#![allow(clippy::unwrap_used)]
// Device runner tests: in-memory collaborators for enrichment, alerts,
// registration and PTR backfill, wiremock for one update through the
// real HTTP adapters.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portsync_api::{LibreNmsClient, NetboxClient};
use portsync_core::{
    Alert, AssetDevice, AssetDirectory, AssetObject, AssetStatus, AuditSink, CoreError,
    DeviceEdit, DeviceSync, MonitoredDevice, MonitoredDeviceId, MonitoredDevices, OutcomeStatus,
    ReverseResolver, Severity, SubjectType, update_ip_dns,
};

const MON: MonitoredDeviceId = MonitoredDeviceId(42);
const EDGE: AssetObject = AssetObject {
    kind: SubjectType::Device,
    id: 12,
};

// ── In-memory collaborators ─────────────────────────────────────────

#[derive(Default)]
struct FakeMonitoring {
    devices: Vec<MonitoredDevice>,
    /// IP (no prefix) to device id.
    ips: HashMap<String, MonitoredDeviceId>,
    add_result: Option<MonitoredDeviceId>,
    added: Mutex<Vec<String>>,
}

impl MonitoredDevices for FakeMonitoring {
    async fn get_device(&self, device: MonitoredDeviceId) -> Result<MonitoredDevice, CoreError> {
        self.devices
            .iter()
            .find(|d| d.id == device)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                resource: format!("device {device}"),
            })
    }

    async fn device_by_ip(&self, ip: &str) -> Result<MonitoredDevice, CoreError> {
        match self.ips.get(ip) {
            Some(id) => self.get_device(*id).await,
            None => Err(CoreError::NotFound {
                resource: format!("port for IP {ip}"),
            }),
        }
    }

    async fn add_device(&self, host: &str) -> Result<MonitoredDeviceId, CoreError> {
        self.added.lock().unwrap().push(host.to_owned());
        self.add_result.ok_or_else(|| CoreError::Api {
            message: "Could not ping 10.0.0.9".into(),
            status: Some(500),
        })
    }
}

#[derive(Default)]
struct FakeDirectory {
    assets: Vec<AssetDevice>,
    /// Monitoring id to linked object.
    links: HashMap<MonitoredDeviceId, AssetObject>,
    ip_owners: HashMap<String, AssetObject>,
    ip_records: usize,
    reject_updates: bool,
    updates: Mutex<Vec<(AssetObject, DeviceEdit)>>,
    statuses: Mutex<Vec<(AssetObject, AssetStatus)>>,
    dns: Mutex<Vec<(String, String)>>,
}

impl FakeDirectory {
    fn updates(&self) -> Vec<(AssetObject, DeviceEdit)> {
        self.updates.lock().unwrap().clone()
    }
}

impl AssetDirectory for FakeDirectory {
    async fn find_monitored(&self, device: MonitoredDeviceId) -> Result<AssetObject, CoreError> {
        self.links.get(&device).copied().ok_or_else(|| CoreError::NotFound {
            resource: format!("object with monitoring_id {device}"),
        })
    }

    async fn find_by_ip(&self, ip: &str) -> Result<AssetObject, CoreError> {
        self.ip_owners.get(ip).copied().ok_or_else(|| CoreError::NotFound {
            resource: format!("IP address {ip}"),
        })
    }

    async fn get_device(&self, object: AssetObject) -> Result<AssetDevice, CoreError> {
        self.assets
            .iter()
            .find(|a| a.object == object)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                resource: format!("{} {}", object.kind, object.id),
            })
    }

    async fn list_unmonitored(&self) -> Result<Vec<AssetDevice>, CoreError> {
        Ok(self
            .assets
            .iter()
            .filter(|a| a.monitoring_id.is_none())
            .cloned()
            .collect())
    }

    async fn update_device(&self, object: AssetObject, edit: &DeviceEdit) -> Result<(), CoreError> {
        self.updates.lock().unwrap().push((object, edit.clone()));
        if self.reject_updates {
            return Err(CoreError::Api {
                message: "serial: too long".into(),
                status: Some(400),
            });
        }
        Ok(())
    }

    async fn set_status(&self, object: AssetObject, status: AssetStatus) -> Result<(), CoreError> {
        self.statuses.lock().unwrap().push((object, status));
        Ok(())
    }

    async fn set_dns_name(&self, ip: &str, dns_name: &str) -> Result<usize, CoreError> {
        self.dns
            .lock()
            .unwrap()
            .push((ip.to_owned(), dns_name.to_owned()));
        Ok(self.ip_records)
    }
}

#[derive(Default)]
struct FakeAudit {
    entries: Mutex<Vec<(SubjectType, i64, Severity, String)>>,
}

impl FakeAudit {
    fn entries(&self) -> Vec<(SubjectType, i64, Severity, String)> {
        self.entries.lock().unwrap().clone()
    }
}

impl AuditSink for FakeAudit {
    async fn record(
        &self,
        subject_type: SubjectType,
        subject_id: i64,
        severity: Severity,
        message: &str,
    ) -> Result<(), CoreError> {
        self.entries
            .lock()
            .unwrap()
            .push((subject_type, subject_id, severity, message.to_owned()));
        Ok(())
    }
}

struct FakeResolver(Option<&'static str>);

impl ReverseResolver for FakeResolver {
    async fn reverse_lookup(&self, _ip: IpAddr) -> Result<Option<String>, CoreError> {
        Ok(self.0.map(str::to_owned))
    }
}

fn edge_asset() -> AssetDevice {
    AssetDevice {
        primary_ip: Some("10.0.0.1/24".into()),
        ..AssetDevice::new(EDGE, "edge1")
    }
}

fn observed() -> MonitoredDevice {
    MonitoredDevice {
        hardware: Some("x86_64".into()),
        serial: Some("FOC1234".into()),
        ..MonitoredDevice::new(MON)
    }
}

fn monitoring() -> FakeMonitoring {
    FakeMonitoring {
        devices: vec![observed()],
        ips: HashMap::from([("10.0.0.1".to_owned(), MON)]),
        ..FakeMonitoring::default()
    }
}

fn directory() -> FakeDirectory {
    FakeDirectory {
        assets: vec![edge_asset()],
        links: HashMap::from([(MON, EDGE)]),
        ip_owners: HashMap::from([("10.0.0.1".to_owned(), EDGE)]),
        ..FakeDirectory::default()
    }
}

// ── Enrichment ──────────────────────────────────────────────────────

#[tokio::test]
async fn update_device_patches_and_journals() {
    let directory = directory();
    let audit = FakeAudit::default();

    let report = DeviceSync::new(monitoring(), &directory, &audit)
        .update_device(MON)
        .await
        .unwrap();

    assert_eq!(report.status, OutcomeStatus::Applied);
    assert_eq!(report.name, "edge1");
    assert_eq!(report.edit.monitoring_id(), Some(MON));
    assert_eq!(report.edit.description.as_deref(), Some("x86_64"));

    assert_eq!(directory.updates(), vec![(EDGE, report.edit.clone())]);
    let entries = audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!((entries[0].0, entries[0].1, entries[0].2), (SubjectType::Device, 12, Severity::Success));
    assert!(entries[0].3.starts_with("device updated with values from LibreNMS\n\nUpdate Data:\n{"));
}

#[tokio::test]
async fn update_device_without_link_fails() {
    let directory = FakeDirectory {
        links: HashMap::new(),
        ..directory()
    };
    let audit = FakeAudit::default();

    let err = DeviceSync::new(monitoring(), &directory, &audit)
        .update_device(MON)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(directory.updates().is_empty());
    assert!(audit.entries().is_empty());
}

#[tokio::test]
async fn nothing_to_enrich_is_unchanged() {
    let directory = FakeDirectory {
        assets: vec![AssetDevice {
            description: "edge".into(),
            monitoring_id: Some(MON),
            ..edge_asset()
        }],
        ..directory()
    };
    let monitoring = FakeMonitoring {
        devices: vec![MonitoredDevice::new(MON)],
        ..monitoring()
    };
    let audit = FakeAudit::default();

    let report = DeviceSync::new(monitoring, &directory, &audit)
        .update_device(MON)
        .await
        .unwrap();

    assert_eq!(report.status, OutcomeStatus::Unchanged);
    assert!(directory.updates().is_empty());
    assert!(audit.entries().is_empty());
}

#[tokio::test]
async fn rejected_update_is_journaled_as_warning() {
    let directory = FakeDirectory {
        reject_updates: true,
        ..directory()
    };
    let audit = FakeAudit::default();

    let report = DeviceSync::new(monitoring(), &directory, &audit)
        .update_by_ip("10.0.0.1/24")
        .await
        .unwrap();

    assert!(report.is_failed());
    let entries = audit.entries();
    assert_eq!(entries[0].2, Severity::Warning);
    assert_eq!(entries[0].3, "could not update device:\n\nAPI error: serial: too long");
}

#[tokio::test]
async fn dry_run_plans_without_writing() {
    let directory = directory();
    let audit = FakeAudit::default();

    let report = DeviceSync::new(monitoring(), &directory, &audit)
        .dry_run(true)
        .update_by_ip("10.0.0.1")
        .await
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.status, OutcomeStatus::Planned);
    assert!(directory.updates().is_empty());
    assert!(audit.entries().is_empty());
}

#[tokio::test]
async fn update_by_ip_needs_an_owner() {
    let directory = FakeDirectory {
        ip_owners: HashMap::new(),
        ..directory()
    };
    let err = DeviceSync::new(monitoring(), &directory, FakeAudit::default())
        .update_by_ip("10.0.0.1")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ── Missing report ──────────────────────────────────────────────────

#[tokio::test]
async fn missing_report_splits_known_and_unknown() {
    let ghost = AssetObject::new(SubjectType::VirtualMachine, 30);
    let directory = FakeDirectory {
        assets: vec![
            edge_asset(),
            AssetDevice {
                primary_ip: Some("10.0.0.30/24".into()),
                ..AssetDevice::new(ghost, "vm30")
            },
            AssetDevice::new(AssetObject::new(SubjectType::Device, 31), "no-ip"),
        ],
        ..directory()
    };
    let audit = FakeAudit::default();

    let report = DeviceSync::new(monitoring(), &directory, &audit)
        .missing_report()
        .await
        .unwrap();

    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].name, "vm30");
    assert_eq!(report.missing[0].ip, "10.0.0.30");
    assert_eq!(report.missing[0].object, ghost);

    assert_eq!(report.linked.len(), 1);
    assert_eq!(report.linked[0].object, EDGE);
    assert_eq!(report.linked[0].status, OutcomeStatus::Applied);
    assert_eq!(report.failed(), 0);
    assert_eq!(directory.updates().len(), 1);
}

// ── Alerts ──────────────────────────────────────────────────────────

fn alert(state: i64, id: &str) -> Alert {
    Alert::from_json(&format!(
        r#"{{"device_id": 42, "state": {state}, "id": "{id}", "uid": "7",
            "subject": "Device Down!", "sysName": "edge1",
            "timestamp": "2024-05-01 10:00:00", "runbook": ""}}"#
    ))
    .unwrap()
}

#[tokio::test]
async fn first_alert_sets_offline() {
    let directory = directory();
    let audit = FakeAudit::default();

    let report = DeviceSync::new(monitoring(), &directory, &audit)
        .device_down(&alert(1, "7"))
        .await
        .unwrap();

    assert_eq!(report.status, Some(AssetStatus::Offline));
    assert_eq!(*directory.statuses.lock().unwrap(), vec![(EDGE, AssetStatus::Offline)]);
    let entries = audit.entries();
    assert_eq!(entries[0].2, Severity::Danger);
    assert!(entries[0].3.starts_with("Device Down!\n\nedge1 status updated as of 2024-05-01 10:00:00"));
}

#[tokio::test]
async fn cleared_alert_sets_active() {
    let directory = directory();
    let audit = FakeAudit::default();

    DeviceSync::new(monitoring(), &directory, &audit)
        .device_down(&alert(0, "9"))
        .await
        .unwrap();

    assert_eq!(*directory.statuses.lock().unwrap(), vec![(EDGE, AssetStatus::Active)]);
    assert_eq!(audit.entries()[0].2, Severity::Success);
}

#[tokio::test]
async fn repeated_alert_changes_nothing() {
    let directory = FakeDirectory {
        links: HashMap::new(),
        ..directory()
    };
    let audit = FakeAudit::default();

    let report = DeviceSync::new(monitoring(), &directory, &audit)
        .device_down(&alert(1, "9"))
        .await
        .unwrap();

    assert_eq!(report.object, None);
    assert!(directory.statuses.lock().unwrap().is_empty());
    assert!(audit.entries().is_empty());
}

// ── Registration ────────────────────────────────────────────────────

#[tokio::test]
async fn add_device_links_new_id() {
    let monitoring = FakeMonitoring {
        add_result: Some(MonitoredDeviceId(77)),
        ..monitoring()
    };
    let directory = directory();
    let audit = FakeAudit::default();

    let id = DeviceSync::new(&monitoring, &directory, &audit)
        .add_device("10.0.0.9/24", EDGE)
        .await
        .unwrap();

    assert_eq!(id, MonitoredDeviceId(77));
    assert_eq!(*monitoring.added.lock().unwrap(), vec!["10.0.0.9"]);
    let updates = directory.updates();
    assert_eq!(updates[0].1.monitoring_id(), Some(MonitoredDeviceId(77)));
    let entries = audit.entries();
    assert_eq!(entries[0].2, Severity::Info);
    assert_eq!(entries[0].3, "added device to LibreNMS.  id=77");
}

#[tokio::test]
async fn failed_add_is_journaled_and_returned() {
    let directory = directory();
    let audit = FakeAudit::default();

    let err = DeviceSync::new(monitoring(), &directory, &audit)
        .add_device("10.0.0.9", EDGE)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "API error: Could not ping 10.0.0.9");
    assert!(directory.updates().is_empty());
    let entries = audit.entries();
    assert_eq!(entries[0].2, Severity::Warning);
    assert_eq!(entries[0].3, "API error: Could not ping 10.0.0.9");
}

// ── PTR backfill ────────────────────────────────────────────────────

#[tokio::test]
async fn dns_name_is_written_from_ptr() {
    let directory = FakeDirectory {
        ip_records: 1,
        ..directory()
    };

    let report = update_ip_dns(&directory, FakeResolver(Some("edge1.example.net")), "10.0.0.1/24")
        .await
        .unwrap();

    assert_eq!(report.dns_name.as_deref(), Some("edge1.example.net"));
    assert_eq!(report.updated, 1);
    assert_eq!(
        *directory.dns.lock().unwrap(),
        vec![("10.0.0.1".to_owned(), "edge1.example.net".to_owned())]
    );
}

#[tokio::test]
async fn missing_ptr_writes_nothing() {
    let directory = directory();
    let report = update_ip_dns(&directory, FakeResolver(None), "10.0.0.1").await.unwrap();
    assert_eq!(report.dns_name, None);
    assert!(directory.dns.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_ip_is_rejected() {
    let err = update_ip_dns(directory(), FakeResolver(None), "not-an-ip")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput { .. }), "got {err:?}");
}

// ── Through the HTTP adapters ───────────────────────────────────────

#[tokio::test]
async fn update_device_against_mock_servers() {
    let librenms_server = MockServer::start().await;
    let netbox_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "count": 1,
            "devices": [{
                "device_id": 42,
                "hostname": "10.0.0.1",
                "sysName": "edge1",
                "sysDescr": "Linux edge1",
                "hardware": "",
                "purpose": "core router",
                "serial": "",
                "lat": 51.5,
                "lng": -0.12
            }]
        })))
        .mount(&librenms_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .and(query_param("cf_monitoring_id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1, "next": null, "previous": null,
            "results": [{ "id": 12, "name": "edge1" }]
        })))
        .mount(&netbox_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/virtualization/virtual-machines/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0, "next": null, "previous": null, "results": []
        })))
        .mount(&netbox_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/12/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "name": "edge1",
            "description": "",
            "serial": "",
            "custom_fields": { "monitoring_id": 42 }
        })))
        .mount(&netbox_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/dcim/devices/12/"))
        .and(body_json(json!({
            "description": "core router",
            "latitude": 51.5,
            "longitude": -0.12
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 12 })))
        .expect(1)
        .mount(&netbox_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/extras/journal-entries/"))
        .and(body_string_contains("dcim.device"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&netbox_server)
        .await;

    let netbox = NetboxClient::with_client(
        reqwest::Client::new(),
        Url::parse(&netbox_server.uri()).unwrap(),
    );
    let librenms = LibreNmsClient::with_client(
        reqwest::Client::new(),
        Url::parse(&librenms_server.uri()).unwrap(),
    );

    let report = DeviceSync::new(&librenms, &netbox, &netbox)
        .update_device(MON)
        .await
        .unwrap();

    assert_eq!(report.object, EDGE);
    assert_eq!(report.status, OutcomeStatus::Applied);
    assert_eq!(report.edit.custom_fields, None);
}
