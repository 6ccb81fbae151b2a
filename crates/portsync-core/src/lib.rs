// portsync-core: Interface reconciliation between LibreNMS and NetBox.
//
// The engine (`classify`, `diff`, `reconcile`) is synchronous and pure.
// `sync` drives it against the collaborator traits in `sink`, which
// `adapters` implements over the `portsync-api` HTTP clients.
// `device_sync` does the same for whole devices, planning with `enrich`.

pub mod adapters;
pub mod audit;
pub mod classify;
pub mod config;
pub mod convert;
pub mod device_sync;
pub mod diff;
pub mod enrich;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod sink;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use adapters::{SystemResolver, connect};
pub use audit::{Severity, SubjectType};
pub use classify::{Classification, classify};
pub use config::{ServiceEndpoint, SyncConfig, TlsVerification};
pub use device_sync::{
    AlertReport, DeviceReport, DeviceSync, DnsReport, MissingDevice, MissingReport, update_ip_dns,
};
pub use diff::diff;
pub use enrich::{enrich, ip_from_cidr};
pub use error::CoreError;
pub use reconcile::reconcile;
pub use sink::{
    AssetDirectory, AssetSink, AuditSink, MonitoredDevices, MonitoringSource, ReverseResolver,
};
pub use sync::{EditOutcome, OutcomeStatus, PortSync, SyncReport};

pub use model::{
    Alert, AssetDevice, AssetObject, AssetStatus, DeviceCustomFields, DeviceEdit, DeviceId, Duplex,
    EditKind, InterfaceEdit, InterfaceId, InterfaceKind, InterfaceRecord, MacAddress,
    MonitoredDevice, MonitoredDeviceId, PlannedEdit, PortRecord,
};
