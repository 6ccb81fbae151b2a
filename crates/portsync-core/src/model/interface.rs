// ── Asset-side domain types ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use super::ids::{DeviceId, InterfaceId};
use super::port::{Duplex, MacAddress};

/// Asset-system interface types this tool assigns.
///
/// A closed subset of NetBox's type slugs; recorded interfaces may carry
/// any slug, which is why [`InterfaceRecord::interface_type`] stays a string.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
pub enum InterfaceKind {
    #[serde(rename = "1000base-t")]
    #[strum(serialize = "1000base-t")]
    Base1000T,
    #[serde(rename = "t1")]
    #[strum(serialize = "t1")]
    T1,
    #[serde(rename = "t3")]
    #[strum(serialize = "t3")]
    T3,
    #[serde(rename = "virtual")]
    #[strum(serialize = "virtual")]
    Virtual,
    #[serde(rename = "xgs-pon")]
    #[strum(serialize = "xgs-pon")]
    XgsPon,
    #[serde(rename = "bridge")]
    #[strum(serialize = "bridge")]
    Bridge,
    #[serde(rename = "lag")]
    #[strum(serialize = "lag")]
    Lag,
    #[serde(rename = "other")]
    #[strum(serialize = "other")]
    Other,
}

/// One interface as recorded in the asset system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub id: InterfaceId,
    /// Join key against [`PortRecord::name`](super::PortRecord::name). Case-sensitive.
    pub name: String,
    pub device_id: DeviceId,
    pub description: String,
    pub mac_address: Option<MacAddress>,
    pub speed_kbps: Option<u64>,
    pub duplex: Option<Duplex>,
    pub interface_type: Option<String>,
    /// Lookup key into the same device's interfaces.
    pub parent_id: Option<InterfaceId>,
}

impl InterfaceRecord {
    pub fn new(id: InterfaceId, name: impl Into<String>, device_id: DeviceId) -> Self {
        Self {
            id,
            name: name.into(),
            device_id,
            description: String::new(),
            mac_address: None,
            speed_kbps: None,
            duplex: None,
            interface_type: None,
            parent_id: None,
        }
    }
}
