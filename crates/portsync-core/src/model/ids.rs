// ── Identity types ──
//
// Numeric ids from the two systems look alike on the wire. Wrapping them
// keeps a LibreNMS device id from ever being passed where a NetBox one
// is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Device id in the asset system (NetBox).
    DeviceId
);

numeric_id!(
    /// Device id in the monitoring system (LibreNMS).
    MonitoredDeviceId
);

numeric_id!(
    /// Interface id in the asset system.
    InterfaceId
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_whitespace() {
        let id: DeviceId = " 42 ".parse().unwrap();
        assert_eq!(id, DeviceId(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_non_numeric() {
        assert!("abc".parse::<MonitoredDeviceId>().is_err());
    }

    #[test]
    fn serializes_transparently() {
        assert_eq!(serde_json::to_string(&InterfaceId(7)).unwrap(), "7");
    }
}
