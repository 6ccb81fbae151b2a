// ── Reconciliation driver ──
//
// Walks one device's observed ports in enumeration order and plans the
// creates/updates that bring the recorded interfaces into agreement.
//
// The name index is built once from the records supplied at the start of
// the pass. Interfaces created during the pass are not added to it, so a
// sub-interface listed after its not-yet-recorded parent is created
// without a parent link; the next pass picks the link up as a linkage
// correction.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::audit;
use crate::classify::classify;
use crate::diff::{converted_speed, diff};
use crate::model::{
    DeviceId, Duplex, EditKind, InterfaceEdit, InterfaceKind, InterfaceRecord, PlannedEdit,
    PortRecord,
};

/// Type assigned to creates the classifier leaves untyped.
pub const DEFAULT_CREATE_KIND: InterfaceKind = InterfaceKind::Lag;

/// Plan the edits for one device.
///
/// `interfaces` records belonging to any device other than `device` are
/// ignored. Output order follows `ports`.
pub fn reconcile(
    device: DeviceId,
    ports: &[PortRecord],
    interfaces: &[InterfaceRecord],
) -> Vec<PlannedEdit> {
    let index = name_index(device, interfaces);
    let mut plan = Vec::new();

    for port in ports {
        let class = classify(&port.media_type, &port.name);
        let parent = class
            .parent_name
            .as_deref()
            .and_then(|name| index.get(name))
            .map(|record| record.id);

        let planned = match index.get(port.name.as_str()) {
            Some(existing) => {
                let (mut edit, _) = diff(existing, port);
                if let (None, Some(parent_id)) = (existing.parent_id, parent) {
                    debug!(interface = %port.name, parent = %parent_id, "linking sub-interface to parent");
                    edit.interface_type = class.interface_type;
                    edit.parent = Some(parent_id);
                }
                if edit.is_empty() {
                    continue;
                }
                PlannedEdit {
                    kind: EditKind::Update {
                        interface_id: existing.id,
                    },
                    interface: port.name.clone(),
                    audit_message: audit::updated_message(&port.name, &edit),
                    edit,
                }
            }
            None => {
                let edit = InterfaceEdit {
                    name: Some(port.name.clone()),
                    interface_type: Some(class.interface_type.unwrap_or(DEFAULT_CREATE_KIND)),
                    parent,
                    description: Some(port.description.clone()),
                    duplex: Some(port.duplex.unwrap_or(Duplex::Auto)),
                    speed: converted_speed(port),
                    mac_address: port.mac_address.as_ref().map(|m| m.as_str().to_owned()),
                    ..InterfaceEdit::for_device(device)
                };
                PlannedEdit {
                    kind: EditKind::Create,
                    interface: port.name.clone(),
                    audit_message: audit::created_message(&port.name, &edit),
                    edit,
                }
            }
        };

        debug!(interface = %planned.interface, kind = planned.kind.label(), "planned edit");
        plan.push(planned);
    }

    plan
}

fn name_index(device: DeviceId, interfaces: &[InterfaceRecord]) -> HashMap<&str, &InterfaceRecord> {
    let mut index = HashMap::with_capacity(interfaces.len());
    for record in interfaces {
        if record.device_id != device {
            warn!(
                interface = %record.name,
                owner = %record.device_id,
                %device,
                "ignoring interface recorded on another device"
            );
            continue;
        }
        if index.insert(record.name.as_str(), record).is_some() {
            warn!(interface = %record.name, %device, "duplicate interface name, keeping the last record");
        }
    }
    index
}
