// ── Domain model ──
//
// Canonical records for both sides of the sync plus the edit descriptors
// computed between them, at interface and device level. API response
// types are converted into these in `convert`, so the engine never sees
// wire formats.

pub mod alert;
pub mod device;
pub mod edit;
pub mod ids;
pub mod interface;
pub mod port;

pub use alert::Alert;
pub use device::{
    AssetDevice, AssetObject, AssetStatus, DeviceCustomFields, DeviceEdit, MonitoredDevice,
};
pub use edit::{EditKind, InterfaceEdit, PlannedEdit};
pub use ids::{DeviceId, InterfaceId, MonitoredDeviceId};
pub use interface::{InterfaceKind, InterfaceRecord};
pub use port::{Duplex, MacAddress, PortRecord};
