// LibreNMS API response types
//
// Every response carries a `status` field (`"ok"` on success) next to
// the payload key. LibreNMS returns SNMP-derived values verbatim, so
// nearly every port field may be null.

use serde::{Deserialize, Serialize};

/// Columns requested from `devices/{id}/ports`.
pub const PORT_COLUMNS: &str =
    "port_id,device_id,ifName,ifDescr,ifAlias,ifType,ifSpeed,ifDuplex,ifPhysAddress";

// ── Port ─────────────────────────────────────────────────────────────

/// Port row, as discovered via SNMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibrePort {
    #[serde(default)]
    pub port_id: Option<i64>,
    #[serde(default)]
    pub device_id: i64,
    #[serde(default, rename = "ifName")]
    pub if_name: Option<String>,
    #[serde(default, rename = "ifDescr")]
    pub if_descr: Option<String>,
    #[serde(default, rename = "ifAlias")]
    pub if_alias: Option<String>,
    #[serde(default, rename = "ifType")]
    pub if_type: Option<String>,
    /// Bits per second.
    #[serde(default, rename = "ifSpeed")]
    pub if_speed: Option<u64>,
    #[serde(default, rename = "ifDuplex")]
    pub if_duplex: Option<String>,
    /// Bare hex, e.g. `0011aabbccdd`.
    #[serde(default, rename = "ifPhysAddress")]
    pub if_phys_address: Option<String>,
}

/// `GET devices/{id}/ports`
#[derive(Debug, Deserialize)]
pub struct PortsResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ports: Vec<LibrePort>,
}

/// `GET ports/{id}` (the payload key is singular but holds a list).
#[derive(Debug, Deserialize)]
pub struct PortResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub port: Vec<LibrePort>,
}

// ── Device ───────────────────────────────────────────────────────────

/// Device object from `devices/{id}`.
///
/// Only the commonly needed fields are modeled; everything else lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibreDevice {
    pub device_id: i64,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default, rename = "sysName")]
    pub sys_name: Option<String>,
    #[serde(default, rename = "sysDescr")]
    pub sys_descr: Option<String>,
    #[serde(default)]
    pub hardware: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `GET devices/{id}`
#[derive(Debug, Deserialize)]
pub struct DeviceResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub devices: Vec<LibreDevice>,
}

/// Body for `POST devices`.
#[derive(Debug, Clone, Serialize)]
pub struct AddDeviceRequest {
    pub hostname: String,
    /// Add the device even when SNMP does not answer yet.
    pub ping_fallback: bool,
}

/// Device summary inside an add-device response.
#[derive(Debug, Clone, Deserialize)]
pub struct AddedDevice {
    pub device_id: i64,
    #[serde(default)]
    pub hostname: Option<String>,
}

/// `POST devices`
#[derive(Debug, Deserialize)]
pub struct AddDeviceResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub devices: Vec<AddedDevice>,
}

// ── IP addresses ─────────────────────────────────────────────────────

/// One row of `resources/ip/addresses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpAddressEntry {
    #[serde(default)]
    pub ipv4_address: Option<String>,
    #[serde(default)]
    pub ipv4_prefixlen: Option<u8>,
    pub port_id: i64,
}

/// `GET resources/ip/addresses`
#[derive(Debug, Deserialize)]
pub struct IpAddressesResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ip_addresses: Vec<IpAddressEntry>,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
