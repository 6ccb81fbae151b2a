// ── Monitoring alerts ──
//
// The JSON body a LibreNMS API transport posts when an alert fires or
// clears. The transport template renders `id` and `uid` as strings, but
// hand-written payloads often carry numbers, so both are accepted.

use serde::{Deserialize, Deserializer, Serialize};

use super::device::AssetStatus;
use super::ids::MonitoredDeviceId;
use crate::audit::Severity;

const STATE_FIRING: i64 = 1;
const STATE_CLEARED: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub device_id: MonitoredDeviceId,
    #[serde(default)]
    pub host: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub runbook: String,
    #[serde(default)]
    pub severity: String,
    pub state: i64,
    #[serde(default)]
    pub subject: String,
    #[serde(default, rename = "sysName")]
    pub sys_name: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub uid: String,
}

impl Alert {
    /// Parse a transport payload.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Status and journal severity this alert moves its device to.
    ///
    /// A firing alert only counts on its first occurrence (`id == uid`);
    /// repeats and unknown states change nothing.
    pub fn transition(&self) -> Option<(AssetStatus, Severity)> {
        match self.state {
            STATE_FIRING if self.id == self.uid => Some((AssetStatus::Offline, Severity::Danger)),
            STATE_CLEARED => Some((AssetStatus::Active, Severity::Success)),
            _ => None,
        }
    }

    pub fn journal_message(&self) -> String {
        format!(
            "{}\n\n{} status updated as of {}\n\n{}",
            self.subject, self.sys_name, self.timestamp, self.runbook
        )
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
