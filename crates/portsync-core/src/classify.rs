// ── Interface type classification ──
//
// Maps a discovered port's SNMP ifType plus its name to an asset-system
// interface type. A `<base>.<digits>` name marks a tagged sub-interface:
// its type is forced to `virtual` and `<base>` becomes the parent name.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::InterfaceKind;

/// `<base>.<vlan>`, e.g. `eth0.100` or `Gi0/1.20`. Compiled once.
static SUBINTERFACE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // literal pattern
    Regex::new(r"^(?P<base>.+)\.(?P<tag>[0-9]+)$").unwrap()
});

/// Result of classifying one port.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    /// `None` only for media types that deliberately defer to the caller
    /// (link aggregates).
    pub interface_type: Option<InterfaceKind>,
    /// Set when the name carries a VLAN suffix.
    pub parent_name: Option<String>,
}

/// Classify a port from its ifType and name. Pure.
pub fn classify(media_type: &str, name: &str) -> Classification {
    if let Some(base) = subinterface_parent(name) {
        return Classification {
            interface_type: Some(InterfaceKind::Virtual),
            parent_name: Some(base.to_owned()),
        };
    }
    Classification {
        interface_type: kind_for_media_type(media_type),
        parent_name: None,
    }
}

/// Translate an SNMP ifType into an interface type.
///
/// Unknown codes fall back to [`InterfaceKind::Other`]; `ieee8023adLag`
/// yields `None` so the caller can apply its own default.
pub fn kind_for_media_type(media_type: &str) -> Option<InterfaceKind> {
    let kind = match media_type {
        "ieee8023adLag" => return None,
        "ethernetCsmacd" => InterfaceKind::Base1000T,
        "ds1" => InterfaceKind::T1,
        "ds3" => InterfaceKind::T3,
        "l2vlan" | "l3ipvlan" | "propVirtual" => InterfaceKind::Virtual,
        "gpon" | "aluGponOnu" | "aluGponPhysicalUni" => InterfaceKind::XgsPon,
        "bridge" => InterfaceKind::Bridge,
        // other, softwareLoopback, and anything unrecognized
        _ => InterfaceKind::Other,
    };
    Some(kind)
}

/// The parent name of a tagged sub-interface, if `name` is one.
pub fn subinterface_parent(name: &str) -> Option<&str> {
    SUBINTERFACE
        .captures(name)
        .and_then(|caps| caps.name("base"))
        .map(|base| base.as_str())
}
