// ── API-to-domain type conversions ──
//
// Bridges raw `portsync_api` types into the engine's records, and edits
// back into NetBox write bodies, for interfaces and whole devices. MAC addresses and duplex values from
// both systems are normalized here so the differ compares like with like.

use portsync_api::librenms::models::{LibreDevice, LibrePort};
use portsync_api::netbox::models::{
    CustomFieldsWrite, DeviceWrite, InterfaceWrite, NetboxDevice, NetboxInterface,
};

use crate::model::{
    AssetDevice, AssetObject, DeviceEdit, DeviceId, Duplex, InterfaceEdit, InterfaceId,
    InterfaceRecord, MacAddress, MonitoredDevice, MonitoredDeviceId, PortRecord,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Treat empty strings like missing values.
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

/// LibreNMS reports SNMP `dot3StatsDuplexStatus` names.
fn librenms_duplex(raw: Option<&str>) -> Option<Duplex> {
    match raw {
        Some("fullDuplex") => Some(Duplex::Full),
        Some("halfDuplex") => Some(Duplex::Half),
        _ => None,
    }
}

// ── LibreNMS port → PortRecord ─────────────────────────────────────

impl From<LibrePort> for PortRecord {
    fn from(port: LibrePort) -> Self {
        let name = non_empty(port.if_name)
            .or_else(|| non_empty(port.if_descr))
            .unwrap_or_default();
        Self {
            name,
            media_type: port.if_type.unwrap_or_default(),
            description: port.if_alias.unwrap_or_default(),
            mac_address: port.if_phys_address.as_deref().and_then(MacAddress::parse),
            speed: port.if_speed,
            duplex: librenms_duplex(port.if_duplex.as_deref()),
            device_id: MonitoredDeviceId(port.device_id),
        }
    }
}

// ── NetBox interface → InterfaceRecord ─────────────────────────────

impl From<NetboxInterface> for InterfaceRecord {
    fn from(iface: NetboxInterface) -> Self {
        Self {
            id: InterfaceId(iface.id),
            name: iface.name,
            device_id: DeviceId(iface.device.id),
            description: iface.description,
            mac_address: iface.mac_address.as_deref().and_then(MacAddress::parse),
            speed_kbps: iface.speed,
            duplex: iface.duplex.and_then(|c| c.value.parse().ok()),
            interface_type: iface.interface_type.map(|c| c.value),
            parent_id: iface.parent.map(|p| InterfaceId(p.id)),
        }
    }
}

// ── InterfaceEdit → NetBox write body ──────────────────────────────

impl From<&InterfaceEdit> for InterfaceWrite {
    fn from(edit: &InterfaceEdit) -> Self {
        Self {
            device: Some(edit.device.get()),
            name: edit.name.clone(),
            interface_type: edit.interface_type.map(|kind| kind.as_ref().to_owned()),
            parent: edit.parent.map(InterfaceId::get),
            description: edit.description.clone(),
            duplex: edit.duplex.map(|duplex| duplex.as_ref().to_owned()),
            speed: edit.speed,
            // NetBox rejects "" for a MAC; null clears it.
            mac_address: edit
                .mac_address
                .as_ref()
                .map(|mac| Some(mac.clone()).filter(|m| !m.is_empty())),
        }
    }
}

// ── Devices ────────────────────────────────────────────────────────

impl From<LibreDevice> for MonitoredDevice {
    fn from(device: LibreDevice) -> Self {
        Self {
            id: MonitoredDeviceId(device.device_id),
            hostname: non_empty(device.hostname),
            sys_name: non_empty(device.sys_name),
            sys_descr: non_empty(device.sys_descr),
            hardware: non_empty(device.hardware),
            purpose: non_empty(device.purpose),
            serial: non_empty(device.serial),
            lat: device.lat,
            lng: device.lng,
        }
    }
}

/// Asset record for a device or VM fetched from `object`'s endpoint.
pub fn asset_device(object: AssetObject, device: NetboxDevice) -> AssetDevice {
    AssetDevice {
        object,
        name: device.name.unwrap_or_default(),
        description: device.description,
        serial: device.serial,
        // Unset links are stored as null or 0 depending on how they were cleared.
        monitoring_id: device
            .custom_fields
            .monitoring_id
            .filter(|id| *id > 0)
            .map(MonitoredDeviceId),
        primary_ip: device.primary_ip.map(|ip| ip.address),
        status: device.status.map(|c| c.value),
    }
}

impl From<&DeviceEdit> for DeviceWrite {
    fn from(edit: &DeviceEdit) -> Self {
        Self {
            custom_fields: edit.custom_fields.map(|cf| CustomFieldsWrite {
                monitoring_id: cf.monitoring_id.map(MonitoredDeviceId::get),
            }),
            description: edit.description.clone(),
            serial: edit.serial.clone(),
            latitude: edit.latitude,
            longitude: edit.longitude,
            status: None,
        }
    }
}
