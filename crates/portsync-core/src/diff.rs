// ── Interface differ ──
//
// Field-by-field comparison of a recorded interface against the port the
// monitoring system sees. Produces a sparse patch: a field is populated
// only when its comparison reports a difference.

use crate::model::{Duplex, InterfaceEdit, InterfaceRecord, MacAddress, PortRecord};

/// Monitoring speed unit per asset speed unit (bps → Kbps).
pub const SPEED_DIVISOR: u64 = 1000;

/// Observed speed in the asset system's unit. Truncating: sub-1000
/// differences in the raw value are invisible after conversion.
pub fn converted_speed(port: &PortRecord) -> Option<u64> {
    port.speed.map(|raw| raw / SPEED_DIVISOR)
}

/// Compare one recorded interface with its observed port.
///
/// Returns the patch and whether anything changed. Comparison rules:
///
/// - description vs the port alias, exact.
/// - speed after unit conversion; an absent value on either side compares as 0.
/// - duplex; an absent value on either side compares as `auto`.
/// - MAC; an absent value on either side compares as the empty string.
pub fn diff(existing: &InterfaceRecord, observed: &PortRecord) -> (InterfaceEdit, bool) {
    let mut edit = InterfaceEdit::for_device(existing.device_id);

    let description_changed = existing.description != observed.description;
    if description_changed {
        edit.description = Some(observed.description.clone());
    }

    let observed_speed = converted_speed(observed).unwrap_or(0);
    let speed_changed = existing.speed_kbps.unwrap_or(0) != observed_speed;
    if speed_changed {
        edit.speed = Some(observed_speed);
    }

    let observed_duplex = observed.duplex.unwrap_or(Duplex::Auto);
    let duplex_changed = existing.duplex.unwrap_or(Duplex::Auto) != observed_duplex;
    if duplex_changed {
        edit.duplex = Some(observed_duplex);
    }

    let observed_mac = observed.mac_address.as_ref().map_or("", MacAddress::as_str);
    let existing_mac = existing.mac_address.as_ref().map_or("", MacAddress::as_str);
    let mac_changed = existing_mac != observed_mac;
    if mac_changed {
        edit.mac_address = Some(observed_mac.to_owned());
    }

    let changed = description_changed || speed_changed || duplex_changed || mac_changed;
    (edit, changed)
}
