// ── Edit descriptors ──
//
// Sparse patches against an interface. Every field is an explicit
// `Option`: `None` means "leave unchanged", so legitimate values like a
// speed of 0 or an empty MAC stay distinguishable from "no change".

use serde::{Deserialize, Serialize};

use super::ids::{DeviceId, InterfaceId};
use super::interface::InterfaceKind;
use super::port::Duplex;

/// Intent to change one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceEdit {
    /// Owning asset device. Always present.
    pub device: DeviceId,
    /// Set on creates only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub interface_type: Option<InterfaceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<InterfaceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplex: Option<Duplex>,
    /// Asset-system unit (Kbps).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u64>,
    /// `Some("")` clears the recorded MAC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

impl InterfaceEdit {
    /// Empty patch scoped to a device.
    pub fn for_device(device: DeviceId) -> Self {
        Self {
            device,
            name: None,
            interface_type: None,
            parent: None,
            description: None,
            duplex: None,
            speed: None,
            mac_address: None,
        }
    }

    /// `true` when no interface field is populated (device/name excluded).
    pub fn is_empty(&self) -> bool {
        self.interface_type.is_none()
            && self.parent.is_none()
            && self.description.is_none()
            && self.duplex.is_none()
            && self.speed.is_none()
            && self.mac_address.is_none()
    }
}

/// What applying an edit does on the asset side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EditKind {
    Create,
    Update { interface_id: InterfaceId },
}

impl EditKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update { .. } => "update",
        }
    }
}

/// One operation of a reconciliation plan, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedEdit {
    pub kind: EditKind,
    /// Name of the interface the edit targets.
    pub interface: String,
    pub edit: InterfaceEdit,
    /// Audit text to record once the edit has been applied.
    pub audit_message: String,
}
