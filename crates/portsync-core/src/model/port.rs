// ── Monitoring-side domain types ──

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumString};

use super::ids::MonitoredDeviceId;

/// Link duplex, in the asset system's vocabulary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Duplex {
    Auto,
    Full,
    Half,
}

/// MAC address, normalized to uppercase colon-separated form (AA:BB:CC:DD:EE:FF).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacAddress(String);

impl MacAddress {
    /// Parse any common format: colon, dash, or dot separated, or bare hex.
    ///
    /// Returns `None` for empty input or anything that isn't 12 hex digits.
    pub fn parse(raw: impl AsRef<str>) -> Option<Self> {
        let hex: String = raw
            .as_ref()
            .chars()
            .filter(|c| !matches!(c, ':' | '-' | '.' | ' '))
            .collect();
        if hex.len() != 12 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let upper = hex.to_ascii_uppercase();
        let octets: Vec<&str> = (0..6).filter_map(|i| upper.get(i * 2..i * 2 + 2)).collect();
        Some(Self(octets.join(":")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One port as discovered by the monitoring system.
///
/// Snapshot for a single reconciliation pass; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRecord {
    /// Unique within the device. May carry a VLAN suffix (`eth0.100`).
    pub name: String,
    /// SNMP ifType name, e.g. `ethernetCsmacd`.
    pub media_type: String,
    /// ifAlias.
    pub description: String,
    pub mac_address: Option<MacAddress>,
    /// Raw monitoring unit (bits per second).
    pub speed: Option<u64>,
    /// `None` compares as [`Duplex::Auto`].
    pub duplex: Option<Duplex>,
    pub device_id: MonitoredDeviceId,
}

impl PortRecord {
    /// Minimal record with only a name and media type, as used in tests
    /// and fixtures; every optional field is absent.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, device_id: MonitoredDeviceId) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            description: String::new(),
            mac_address: None,
            speed: None,
            duplex: None,
            device_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mac_from_bare_hex() {
        let mac = MacAddress::parse("001122aabbcc").unwrap();
        assert_eq!(mac.as_str(), "00:11:22:AA:BB:CC");
    }

    #[test]
    fn mac_from_cisco_dotted() {
        let mac = MacAddress::parse("0011.22aa.bbcc").unwrap();
        assert_eq!(mac.as_str(), "00:11:22:AA:BB:CC");
    }

    #[test]
    fn mac_rejects_garbage() {
        assert!(MacAddress::parse("").is_none());
        assert!(MacAddress::parse("0011").is_none());
        assert!(MacAddress::parse("zz1122aabbcc").is_none());
    }

    #[test]
    fn duplex_strings() {
        assert_eq!(Duplex::Full.to_string(), "full");
        assert_eq!("half".parse::<Duplex>().unwrap(), Duplex::Half);
        assert!("fullDuplex".parse::<Duplex>().is_err());
    }
}
