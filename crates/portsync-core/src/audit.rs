// ── Audit vocabulary ──
//
// Severity levels and subject types for journal entries, plus the message
// templates every applied or failed edit is recorded with.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::model::{DeviceEdit, InterfaceEdit, MonitoredDeviceId};

/// Journal entry severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

/// Kind of asset object an audit entry is attached to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubjectType {
    Device,
    Location,
    VirtualMachine,
    IpAddress,
}

fn edit_json(edit: &InterfaceEdit) -> String {
    serde_json::to_string_pretty(edit).unwrap_or_else(|_| String::from("{}"))
}

pub fn updated_message(name: &str, edit: &InterfaceEdit) -> String {
    format!(
        "interface {name} updated with values from LibreNMS\n\nUpdate Data:\n{}",
        edit_json(edit)
    )
}

pub fn created_message(name: &str, edit: &InterfaceEdit) -> String {
    format!(
        "interface {name} created from LibreNMS\n\nCreate Data:\n{}",
        edit_json(edit)
    )
}

pub fn update_failed_message(name: &str, error: &str, edit: &InterfaceEdit) -> String {
    format!(
        "could not update interface {name}:\n\n{error}\n\nUpdate Data:\n{}",
        edit_json(edit)
    )
}

pub fn create_failed_message(name: &str, error: &str, edit: &InterfaceEdit) -> String {
    format!(
        "could not create interface {name}:\n\n{error}\n\nCreate Data:\n{}",
        edit_json(edit)
    )
}

pub fn device_updated_message(edit: &DeviceEdit) -> String {
    let data = serde_json::to_string(edit).unwrap_or_else(|_| String::from("{}"));
    format!("device updated with values from LibreNMS\n\nUpdate Data:\n{data}")
}

pub fn device_update_failed_message(error: &str) -> String {
    format!("could not update device:\n\n{error}")
}

pub fn device_added_message(id: MonitoredDeviceId) -> String {
    format!("added device to LibreNMS.  id={id}")
}

/// Closing entry for a pass that attempted at least one edit.
pub fn summary_message(applied: usize, failed: usize) -> String {
    format!("LibreNMS port sync finished: {applied} interface(s) changed, {failed} failed")
}
