// ── Device enrichment ──
//
// Computes the patch that copies discovered facts from a monitored device
// onto its asset record. Pure; the runner in `device_sync` applies it.

use crate::model::{AssetDevice, DeviceCustomFields, DeviceEdit, MonitoredDevice};

fn present(value: Option<&String>) -> Option<&String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Plan the update of `existing` from what monitoring knows about it.
///
/// The monitoring link is only written when the asset has none, and the
/// description only when the asset's is empty. Serial and coordinates
/// always follow the monitoring side when it reports them.
pub fn enrich(existing: &AssetDevice, observed: &MonitoredDevice) -> DeviceEdit {
    let custom_fields = existing.monitoring_id.is_none().then_some(DeviceCustomFields {
        monitoring_id: Some(observed.id),
    });

    let description = if existing.description.is_empty() {
        present(observed.purpose.as_ref())
            .or_else(|| present(observed.hardware.as_ref()))
            .or_else(|| present(observed.sys_descr.as_ref()))
            .cloned()
    } else {
        None
    };

    DeviceEdit {
        custom_fields,
        description,
        serial: present(observed.serial.as_ref()).cloned(),
        latitude: observed.lat,
        longitude: observed.lng,
    }
}

/// Strip a prefix length: `10.0.0.5/24` becomes `10.0.0.5`.
pub fn ip_from_cidr(addr: &str) -> &str {
    addr.split_once('/').map_or(addr, |(ip, _)| ip).trim()
}
