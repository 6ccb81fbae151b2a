// ── HTTP-backed collaborators ──
//
// Implements the collaborator traits over the `portsync_api` clients and
// builds both clients from a `SyncConfig`. PTR lookups go through the
// system resolver configuration.

use std::net::IpAddr;

use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::error::ResolveErrorKind;
use tracing::{debug, warn};

use portsync_api::netbox::models::{DeviceWrite, InterfaceWrite, JournalKind, ObjectType};
use portsync_api::transport::{TlsMode, TransportConfig};
use portsync_api::{LibreNmsClient, NetboxClient};

use crate::audit::{Severity, SubjectType};
use crate::config::{SyncConfig, TlsVerification};
use crate::convert::asset_device;
use crate::error::CoreError;
use crate::model::{
    AssetDevice, AssetObject, AssetStatus, DeviceEdit, DeviceId, InterfaceEdit, InterfaceId,
    InterfaceRecord, MonitoredDevice, MonitoredDeviceId, PortRecord,
};
use crate::sink::{
    AssetDirectory, AssetSink, AuditSink, MonitoredDevices, MonitoringSource, ReverseResolver,
};

/// Filters selecting objects that should be, but are not, monitored.
const UNMONITORED_FILTERS: [(&str, &str); 3] = [
    ("status", "active"),
    ("has_primary_ip", "true"),
    ("cf_monitoring_id__lte", "0"),
];

// ── Construction ───────────────────────────────────────────────────

/// Build the NetBox and LibreNMS clients described by `config`.
pub fn connect(config: &SyncConfig) -> Result<(NetboxClient, LibreNmsClient), CoreError> {
    let transport = build_transport(config);
    debug!(netbox = %config.netbox.url, librenms = %config.librenms.url, "building API clients");

    let netbox = NetboxClient::new(config.netbox.url.clone(), &config.netbox.token, &transport)
        .map_err(|e| connection_error("NetBox", config.netbox.url.as_str(), e))?;
    let librenms =
        LibreNmsClient::new(config.librenms.url.clone(), &config.librenms.token, &transport)
            .map_err(|e| connection_error("LibreNMS", config.librenms.url.as_str(), e))?;
    Ok((netbox, librenms))
}

fn connection_error(service: &'static str, url: &str, err: portsync_api::Error) -> CoreError {
    match CoreError::from(err) {
        CoreError::ConnectionFailed { reason, .. } => CoreError::ConnectionFailed {
            service,
            url: url.to_owned(),
            reason,
        },
        other => other,
    }
}

/// Build a [`TransportConfig`] from the sync configuration.
fn build_transport(config: &SyncConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

// ── Vocabulary mapping ─────────────────────────────────────────────

fn journal_kind(severity: Severity) -> JournalKind {
    match severity {
        Severity::Info => JournalKind::Info,
        Severity::Success => JournalKind::Success,
        Severity::Warning => JournalKind::Warning,
        Severity::Danger => JournalKind::Danger,
    }
}

fn object_type(subject: SubjectType) -> ObjectType {
    match subject {
        SubjectType::Device => ObjectType::Device,
        SubjectType::Location => ObjectType::Location,
        SubjectType::VirtualMachine => ObjectType::VirtualMachine,
        SubjectType::IpAddress => ObjectType::IpAddress,
    }
}

fn subject_type(object: ObjectType) -> SubjectType {
    match object {
        ObjectType::Device => SubjectType::Device,
        ObjectType::Location => SubjectType::Location,
        ObjectType::VirtualMachine => SubjectType::VirtualMachine,
        ObjectType::IpAddress => SubjectType::IpAddress,
    }
}

// ── Trait impls ────────────────────────────────────────────────────

impl MonitoringSource for LibreNmsClient {
    async fn list_ports(&self, device: MonitoredDeviceId) -> Result<Vec<PortRecord>, CoreError> {
        let ports = LibreNmsClient::list_ports(self, device.get()).await?;
        Ok(ports.into_iter().map(PortRecord::from).collect())
    }
}

impl AssetSink for NetboxClient {
    async fn list_interfaces(&self, device: DeviceId) -> Result<Vec<InterfaceRecord>, CoreError> {
        let interfaces = NetboxClient::list_interfaces(self, device.get()).await?;
        Ok(interfaces.into_iter().map(InterfaceRecord::from).collect())
    }

    async fn create_interface(
        &self,
        device: DeviceId,
        edit: &InterfaceEdit,
    ) -> Result<InterfaceRecord, CoreError> {
        let body = InterfaceWrite {
            device: Some(device.get()),
            ..InterfaceWrite::from(edit)
        };
        let created = NetboxClient::create_interface(self, &body).await?;
        Ok(created.into())
    }

    async fn update_interface(
        &self,
        interface: InterfaceId,
        edit: &InterfaceEdit,
    ) -> Result<InterfaceRecord, CoreError> {
        let body = InterfaceWrite::from(edit);
        let updated = NetboxClient::update_interface(self, interface.get(), &body).await?;
        Ok(updated.into())
    }
}

impl AuditSink for NetboxClient {
    async fn record(
        &self,
        subject_type: SubjectType,
        subject_id: i64,
        severity: Severity,
        message: &str,
    ) -> Result<(), CoreError> {
        self.add_journal_entry(object_type(subject_type), subject_id, journal_kind(severity), message)
            .await?;
        Ok(())
    }
}

impl MonitoredDevices for LibreNmsClient {
    async fn get_device(&self, device: MonitoredDeviceId) -> Result<MonitoredDevice, CoreError> {
        let found = LibreNmsClient::get_device(self, device.get()).await?;
        Ok(found.into())
    }

    async fn device_by_ip(&self, ip: &str) -> Result<MonitoredDevice, CoreError> {
        let found = self.get_device_by_ip(ip).await?;
        Ok(found.into())
    }

    async fn add_device(&self, host: &str) -> Result<MonitoredDeviceId, CoreError> {
        let id = LibreNmsClient::add_device(self, host).await?;
        Ok(MonitoredDeviceId(id))
    }
}

impl AssetDirectory for NetboxClient {
    async fn find_monitored(&self, device: MonitoredDeviceId) -> Result<AssetObject, CoreError> {
        let (object_type, id) = self.find_monitored_object(device.get()).await?;
        Ok(AssetObject::new(subject_type(object_type), id))
    }

    async fn find_by_ip(&self, ip: &str) -> Result<AssetObject, CoreError> {
        let mut found = self.search_ip(ip).await?;
        if found.len() != 1 {
            warn!(ip, count = found.len(), "IP does not match exactly one record");
            return Err(if found.is_empty() {
                CoreError::NotFound {
                    resource: format!("IP address {ip}"),
                }
            } else {
                CoreError::Ambiguous {
                    message: format!("{} IP address records match {ip}", found.len()),
                }
            });
        }
        let assigned = found.pop().and_then(|record| record.assigned_object);
        let object = assigned.and_then(|a| match (a.device, a.virtual_machine) {
            (Some(device), _) => Some(AssetObject::new(SubjectType::Device, device.id)),
            (None, Some(vm)) => Some(AssetObject::new(SubjectType::VirtualMachine, vm.id)),
            (None, None) => None,
        });
        object.ok_or_else(|| CoreError::NotFound {
            resource: format!("device or VM assigned IP {ip}"),
        })
    }

    async fn get_device(&self, object: AssetObject) -> Result<AssetDevice, CoreError> {
        let device = self.get_object(object_type(object.kind), object.id).await?;
        Ok(asset_device(object, device))
    }

    async fn list_unmonitored(&self) -> Result<Vec<AssetDevice>, CoreError> {
        let filters: Vec<(&str, String)> = UNMONITORED_FILTERS
            .iter()
            .map(|(k, v)| (*k, (*v).to_owned()))
            .collect();
        let devices = self.list_devices(&filters).await?;
        let vms = self.list_virtual_machines(&filters).await?;

        let devices = devices
            .into_iter()
            .map(|d| asset_device(AssetObject::new(SubjectType::Device, d.id), d));
        let vms = vms
            .into_iter()
            .map(|d| asset_device(AssetObject::new(SubjectType::VirtualMachine, d.id), d));
        Ok(devices.chain(vms).collect())
    }

    async fn update_device(&self, object: AssetObject, edit: &DeviceEdit) -> Result<(), CoreError> {
        let body = DeviceWrite::from(edit);
        self.update_object(object_type(object.kind), object.id, &body).await?;
        Ok(())
    }

    async fn set_status(&self, object: AssetObject, status: AssetStatus) -> Result<(), CoreError> {
        let body = DeviceWrite {
            status: Some(status.as_ref().to_owned()),
            ..DeviceWrite::default()
        };
        self.update_object(object_type(object.kind), object.id, &body).await?;
        Ok(())
    }

    async fn set_dns_name(&self, ip: &str, dns_name: &str) -> Result<usize, CoreError> {
        let found = self.search_ip(ip).await?;
        for record in &found {
            self.set_ip_dns_name(record.id, dns_name).await?;
        }
        Ok(found.len())
    }
}

/// [`ReverseResolver`] over the host's resolver configuration.
pub struct SystemResolver {
    resolver: TokioAsyncResolver,
}

impl SystemResolver {
    /// Read `/etc/resolv.conf` (or the platform equivalent).
    pub fn from_system_conf() -> Result<Self, CoreError> {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().map_err(|e| CoreError::Config {
            message: format!("could not read system resolver configuration: {e}"),
        })?;
        Ok(Self { resolver })
    }
}

impl ReverseResolver for SystemResolver {
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Option<String>, CoreError> {
        match self.resolver.reverse_lookup(ip).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .next()
                .map(|name| name.to_string().trim_end_matches('.').to_owned())),
            Err(e) => match e.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => Ok(None),
                _ => Err(CoreError::Api {
                    message: format!("reverse lookup of {ip} failed: {e}"),
                    status: None,
                }),
            },
        }
    }
}
