// ── Collaborator seams ──
//
// The sync runners talk to the outside world only through these traits.
// `adapters` implements them over the HTTP clients; tests implement them
// in memory.

#![allow(async_fn_in_trait)]

use std::net::IpAddr;

use crate::audit::{Severity, SubjectType};
use crate::error::CoreError;
use crate::model::{
    AssetDevice, AssetObject, AssetStatus, DeviceEdit, DeviceId, InterfaceEdit, InterfaceId,
    InterfaceRecord, MonitoredDevice, MonitoredDeviceId, PortRecord,
};

/// Where observed ports come from.
pub trait MonitoringSource {
    /// Ports of one monitored device, in enumeration order.
    ///
    /// Returns a not-found error when the device has none.
    async fn list_ports(&self, device: MonitoredDeviceId) -> Result<Vec<PortRecord>, CoreError>;
}

/// Device-level lookups and registration in the monitoring system.
pub trait MonitoredDevices {
    async fn get_device(&self, device: MonitoredDeviceId) -> Result<MonitoredDevice, CoreError>;

    /// The device owning `ip` (no prefix length). Not-found when no port carries it.
    async fn device_by_ip(&self, ip: &str) -> Result<MonitoredDevice, CoreError>;

    /// Start monitoring `host`, returning the new device id.
    async fn add_device(&self, host: &str) -> Result<MonitoredDeviceId, CoreError>;
}

/// Device and VM records in the asset system.
pub trait AssetDirectory {
    /// The one object linked to `device`. Not-found or ambiguous otherwise.
    async fn find_monitored(&self, device: MonitoredDeviceId) -> Result<AssetObject, CoreError>;

    /// The object `ip` is assigned to. The address must match exactly one record.
    async fn find_by_ip(&self, ip: &str) -> Result<AssetObject, CoreError>;

    async fn get_device(&self, object: AssetObject) -> Result<AssetDevice, CoreError>;

    /// Active objects with a primary IP and no monitoring link.
    async fn list_unmonitored(&self) -> Result<Vec<AssetDevice>, CoreError>;

    async fn update_device(&self, object: AssetObject, edit: &DeviceEdit) -> Result<(), CoreError>;

    async fn set_status(&self, object: AssetObject, status: AssetStatus) -> Result<(), CoreError>;

    /// Set the DNS name on every IP record matching `ip`. Returns how many were updated.
    async fn set_dns_name(&self, ip: &str, dns_name: &str) -> Result<usize, CoreError>;
}

/// PTR lookups.
pub trait ReverseResolver {
    /// The first PTR name for `ip`, without the trailing dot. `None` when there is none.
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Option<String>, CoreError>;
}

/// The system of record for interfaces.
pub trait AssetSink {
    async fn list_interfaces(&self, device: DeviceId) -> Result<Vec<InterfaceRecord>, CoreError>;

    async fn create_interface(
        &self,
        device: DeviceId,
        edit: &InterfaceEdit,
    ) -> Result<InterfaceRecord, CoreError>;

    async fn update_interface(
        &self,
        interface: InterfaceId,
        edit: &InterfaceEdit,
    ) -> Result<InterfaceRecord, CoreError>;
}

/// Append-only audit trail attached to asset objects.
pub trait AuditSink {
    async fn record(
        &self,
        subject_type: SubjectType,
        subject_id: i64,
        severity: Severity,
        message: &str,
    ) -> Result<(), CoreError>;
}

// ── Borrowed collaborators ─────────────────────────────────────────
//
// One NetBox client serves as both the asset and the audit sink, so the
// runners must accept references.

impl<T: MonitoringSource + ?Sized> MonitoringSource for &T {
    async fn list_ports(&self, device: MonitoredDeviceId) -> Result<Vec<PortRecord>, CoreError> {
        (**self).list_ports(device).await
    }
}

impl<T: AssetSink + ?Sized> AssetSink for &T {
    async fn list_interfaces(&self, device: DeviceId) -> Result<Vec<InterfaceRecord>, CoreError> {
        (**self).list_interfaces(device).await
    }

    async fn create_interface(
        &self,
        device: DeviceId,
        edit: &InterfaceEdit,
    ) -> Result<InterfaceRecord, CoreError> {
        (**self).create_interface(device, edit).await
    }

    async fn update_interface(
        &self,
        interface: InterfaceId,
        edit: &InterfaceEdit,
    ) -> Result<InterfaceRecord, CoreError> {
        (**self).update_interface(interface, edit).await
    }
}

impl<T: AuditSink + ?Sized> AuditSink for &T {
    async fn record(
        &self,
        subject_type: SubjectType,
        subject_id: i64,
        severity: Severity,
        message: &str,
    ) -> Result<(), CoreError> {
        (**self).record(subject_type, subject_id, severity, message).await
    }
}

impl<T: MonitoredDevices + ?Sized> MonitoredDevices for &T {
    async fn get_device(&self, device: MonitoredDeviceId) -> Result<MonitoredDevice, CoreError> {
        (**self).get_device(device).await
    }

    async fn device_by_ip(&self, ip: &str) -> Result<MonitoredDevice, CoreError> {
        (**self).device_by_ip(ip).await
    }

    async fn add_device(&self, host: &str) -> Result<MonitoredDeviceId, CoreError> {
        (**self).add_device(host).await
    }
}

impl<T: AssetDirectory + ?Sized> AssetDirectory for &T {
    async fn find_monitored(&self, device: MonitoredDeviceId) -> Result<AssetObject, CoreError> {
        (**self).find_monitored(device).await
    }

    async fn find_by_ip(&self, ip: &str) -> Result<AssetObject, CoreError> {
        (**self).find_by_ip(ip).await
    }

    async fn get_device(&self, object: AssetObject) -> Result<AssetDevice, CoreError> {
        (**self).get_device(object).await
    }

    async fn list_unmonitored(&self) -> Result<Vec<AssetDevice>, CoreError> {
        (**self).list_unmonitored().await
    }

    async fn update_device(&self, object: AssetObject, edit: &DeviceEdit) -> Result<(), CoreError> {
        (**self).update_device(object, edit).await
    }

    async fn set_status(&self, object: AssetObject, status: AssetStatus) -> Result<(), CoreError> {
        (**self).set_status(object, status).await
    }

    async fn set_dns_name(&self, ip: &str, dns_name: &str) -> Result<usize, CoreError> {
        (**self).set_dns_name(ip, dns_name).await
    }
}

impl<T: ReverseResolver + ?Sized> ReverseResolver for &T {
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Option<String>, CoreError> {
        (**self).reverse_lookup(ip).await
    }
}
