// ── Circuit field identifiers ──
//
// Every user-entered field of a circuit record, in form order.
// `last_updated` is deliberately absent: it is system-managed and
// never validated or edited.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// One user-entered field of a circuit record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CircuitField {
    CircuitId,
    ClientName,
    ClientIp,
    Subnet,
    Dns,
    Vlan,
    Bandwidth,
    Location,
    MuxId,
    PortId,
}

impl CircuitField {
    /// All fields in registration-form order.
    pub const ALL: [CircuitField; 10] = [
        Self::CircuitId,
        Self::ClientName,
        Self::ClientIp,
        Self::Subnet,
        Self::Dns,
        Self::Vlan,
        Self::Bandwidth,
        Self::Location,
        Self::MuxId,
        Self::PortId,
    ];

    /// Fields the edit flow re-validates and writes back: [`Self::ALL`]
    /// minus the identity, in the same form order, so the edit screen and
    /// the validator share one list. `circuit_id` is immutable identity and
    /// `last_updated` is system-managed, so neither appears here.
    pub const EDITABLE: [CircuitField; 9] = [
        Self::ClientName,
        Self::ClientIp,
        Self::Subnet,
        Self::Dns,
        Self::Vlan,
        Self::Bandwidth,
        Self::Location,
        Self::MuxId,
        Self::PortId,
    ];

    /// Snake_case key, matching the record's field name.
    pub fn key(self) -> &'static str {
        match self {
            Self::CircuitId => "circuit_id",
            Self::ClientName => "client_name",
            Self::ClientIp => "client_ip",
            Self::Subnet => "subnet",
            Self::Dns => "dns",
            Self::Vlan => "vlan",
            Self::Bandwidth => "bandwidth",
            Self::Location => "location",
            Self::MuxId => "mux_id",
            Self::PortId => "port_id",
        }
    }

    /// Human-facing label derived from the key: underscores become spaces
    /// and each word is capitalized (`circuit_id` → `Circuit Id`). Error
    /// messages depend on this exact derivation.
    pub fn display_name(self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CircuitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn display_name_capitalizes_each_word() {
        assert_eq!(CircuitField::CircuitId.display_name(), "Circuit Id");
        assert_eq!(CircuitField::ClientIp.display_name(), "Client Ip");
        assert_eq!(CircuitField::Vlan.display_name(), "Vlan");
        assert_eq!(CircuitField::MuxId.display_name(), "Mux Id");
    }

    #[test]
    fn all_covers_every_variant() {
        assert_eq!(CircuitField::iter().count(), CircuitField::ALL.len());
    }

    #[test]
    fn editable_is_all_minus_the_identity_in_form_order() {
        let derived: Vec<CircuitField> = CircuitField::ALL
            .into_iter()
            .filter(|&field| field != CircuitField::CircuitId)
            .collect();
        assert_eq!(CircuitField::EDITABLE.to_vec(), derived);
    }
}
