// ── Device-level records ──
//
// The monitoring side's view of a device, the asset side's view of the
// device or VM it belongs to, and the sparse patch computed between them.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::ids::MonitoredDeviceId;
use crate::audit::SubjectType;

/// A device or VM in the asset system, addressed by kind and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetObject {
    pub kind: SubjectType,
    pub id: i64,
}

impl AssetObject {
    pub fn new(kind: SubjectType, id: i64) -> Self {
        Self { kind, id }
    }
}

/// Operational status the tool sets on asset objects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AssetStatus {
    Active,
    Offline,
}

/// One device as discovered by the monitoring system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoredDevice {
    pub id: MonitoredDeviceId,
    pub hostname: Option<String>,
    pub sys_name: Option<String>,
    pub sys_descr: Option<String>,
    pub hardware: Option<String>,
    pub purpose: Option<String>,
    pub serial: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl MonitoredDevice {
    pub fn new(id: MonitoredDeviceId) -> Self {
        Self {
            id,
            hostname: None,
            sys_name: None,
            sys_descr: None,
            hardware: None,
            purpose: None,
            serial: None,
            lat: None,
            lng: None,
        }
    }
}

/// One device or VM as recorded in the asset system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDevice {
    pub object: AssetObject,
    pub name: String,
    pub description: String,
    pub serial: String,
    /// `None` when the custom field is unset or not positive.
    pub monitoring_id: Option<MonitoredDeviceId>,
    /// CIDR notation, as recorded.
    pub primary_ip: Option<String>,
    pub status: Option<String>,
}

impl AssetDevice {
    pub fn new(object: AssetObject, name: impl Into<String>) -> Self {
        Self {
            object,
            name: name.into(),
            description: String::new(),
            serial: String::new(),
            monitoring_id: None,
            primary_ip: None,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCustomFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring_id: Option<MonitoredDeviceId>,
}

/// Sparse patch against a device or VM. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<DeviceCustomFields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl DeviceEdit {
    pub fn is_empty(&self) -> bool {
        self.custom_fields.is_none()
            && self.description.is_none()
            && self.serial.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    /// The monitoring id this edit links the object to, if any.
    pub fn monitoring_id(&self) -> Option<MonitoredDeviceId> {
        self.custom_fields.and_then(|cf| cf.monitoring_id)
    }
}
