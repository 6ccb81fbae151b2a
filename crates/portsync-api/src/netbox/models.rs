// NetBox REST API types
//
// Read models use `#[serde(default)]` liberally: NetBox omits or nulls
// fields depending on version and object state. Write models serialize
// only populated fields so a PATCH never touches what it doesn't mention.

use serde::{Deserialize, Serialize};

// ── Pagination ───────────────────────────────────────────────────────

/// Standard NetBox list envelope.
///
/// ```json
/// { "count": 42, "next": "https://…?offset=50", "previous": null, "results": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

// ── Nested objects ───────────────────────────────────────────────────

/// Brief nested representation (`{ id, url, display, name }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedRef {
    pub id: i64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Choice field (`{ value, label }`), used for `type` and `duplex`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceValue {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
}

// ── Interface ────────────────────────────────────────────────────────

/// Interface object from `dcim/interfaces/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetboxInterface {
    pub id: i64,
    pub device: NestedRef,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub interface_type: Option<ChoiceValue>,
    #[serde(default)]
    pub duplex: Option<ChoiceValue>,
    /// Kbps.
    #[serde(default)]
    pub speed: Option<u64>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub parent: Option<NestedRef>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Body for `POST dcim/interfaces/` and `PATCH dcim/interfaces/{id}/`.
///
/// `mac_address` is doubly optional: `Some(None)` clears the field
/// (serialized as `null`), `None` leaves it out of the payload entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceWrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub interface_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<Option<String>>,
}

// ── Device / virtual machine ──────────────────────────────────────

/// Custom fields this tool reads and writes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomFields {
    #[serde(default)]
    pub monitoring_id: Option<i64>,
}

/// Nested IP reference (`primary_ip`, `primary_ip4`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedIp {
    pub id: i64,
    /// CIDR notation, e.g. `10.0.0.5/24`.
    pub address: String,
}

/// Device from `dcim/devices/` or virtual machine from
/// `virtualization/virtual-machines/`.
///
/// The two share every field read here; VMs simply never carry a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetboxDevice {
    pub id: i64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub status: Option<ChoiceValue>,
    #[serde(default)]
    pub custom_fields: CustomFields,
    #[serde(default)]
    pub primary_ip: Option<NestedIp>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomFieldsWrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring_id: Option<i64>,
}

/// Body for `PATCH` on a device-like object; only populated fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceWrite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<CustomFieldsWrite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ── IP address ───────────────────────────────────────────────────────

/// The interface an IP is assigned to, with its parent device or VM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedObject {
    pub id: i64,
    #[serde(default)]
    pub device: Option<NestedRef>,
    #[serde(default)]
    pub virtual_machine: Option<NestedRef>,
}

/// IP address from `ipam/ip-addresses/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetboxIpAddress {
    pub id: i64,
    pub address: String,
    #[serde(default)]
    pub dns_name: String,
    #[serde(default)]
    pub assigned_object_type: Option<String>,
    #[serde(default)]
    pub assigned_object: Option<AssignedObject>,
}

/// Body for `PATCH ipam/ip-addresses/{id}/`.
#[derive(Debug, Clone, Serialize)]
pub struct IpAddressWrite {
    pub dns_name: String,
}

// ── Journal ──────────────────────────────────────────────────────────

/// Journal entry severity (`kind` on the NetBox side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalKind {
    Info,
    Success,
    Warning,
    Danger,
}

/// Object models that can carry journal entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Device,
    Location,
    VirtualMachine,
    IpAddress,
}

impl ObjectType {
    /// Full content type, e.g. `dcim.device`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Device => "dcim.device",
            Self::Location => "dcim.location",
            Self::VirtualMachine => "virtualization.virtualmachine",
            Self::IpAddress => "ipam.ipaddress",
        }
    }

    /// List endpoint under `/api/`, e.g. `dcim/devices/`.
    pub fn api_path(self) -> &'static str {
        match self {
            Self::Device => "dcim/devices/",
            Self::Location => "dcim/locations/",
            Self::VirtualMachine => "virtualization/virtual-machines/",
            Self::IpAddress => "ipam/ip-addresses/",
        }
    }
}

/// Body for `POST extras/journal-entries/`.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntryWrite {
    pub assigned_object_type: String,
    pub assigned_object_id: i64,
    pub kind: JournalKind,
    pub comments: String,
}

/// NetBox error body (`{"detail": "..."}`), when present.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_type_mapping() {
        assert_eq!(ObjectType::Device.as_str(), "dcim.device");
        assert_eq!(ObjectType::VirtualMachine.as_str(), "virtualization.virtualmachine");
        assert_eq!(ObjectType::IpAddress.api_path(), "ipam/ip-addresses/");
        assert_eq!(ObjectType::VirtualMachine.api_path(), "virtualization/virtual-machines/");
    }

    #[test]
    fn device_write_nests_custom_fields() {
        let body = DeviceWrite {
            custom_fields: Some(CustomFieldsWrite {
                monitoring_id: Some(42),
            }),
            serial: Some("FOC123".into()),
            ..DeviceWrite::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({ "custom_fields": { "monitoring_id": 42 }, "serial": "FOC123" }));
    }

    #[test]
    fn device_tolerates_missing_custom_fields() {
        let raw = json!({
            "id": 12,
            "name": "edge-rtr1",
            "description": "",
            "custom_fields": {},
            "primary_ip": { "id": 3, "address": "10.0.0.5/24" }
        });
        let device: NetboxDevice = serde_json::from_value(raw).unwrap();
        assert!(device.custom_fields.monitoring_id.is_none());
        assert_eq!(device.primary_ip.unwrap().address, "10.0.0.5/24");
    }

    #[test]
    fn write_omits_unset_fields() {
        let body = InterfaceWrite {
            device: Some(7),
            speed: Some(0),
            mac_address: Some(None),
            ..InterfaceWrite::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({ "device": 7, "speed": 0, "mac_address": null }));
    }

    #[test]
    fn interface_tolerates_nulls() {
        let raw = json!({
            "id": 12,
            "device": { "id": 3, "name": "core-sw1" },
            "name": "eth0",
            "description": "",
            "type": null,
            "duplex": null,
            "speed": null,
            "mac_address": null,
            "parent": null
        });
        let intf: NetboxInterface = serde_json::from_value(raw).unwrap();
        assert_eq!(intf.device.id, 3);
        assert!(intf.interface_type.is_none());
        assert!(intf.parent.is_none());
    }
}
