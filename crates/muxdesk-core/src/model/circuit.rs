// ── Circuit domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::CircuitField;

/// A provisioned network circuit: addressing, bandwidth, and hardware
/// mux/port metadata for one client connection.
///
/// `circuit_id` is immutable identity once the record exists. All other
/// user-entered fields are mutable through the edit flow; `last_updated`
/// is refreshed by the portal on create and on every successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitRecord {
    pub circuit_id: String,
    pub client_name: String,
    pub client_ip: String,
    pub subnet: String,
    pub dns: String,
    /// VLAN tag, kept as entered (validated to parse into 1..=4094).
    pub vlan: String,
    /// Bandwidth with unit, e.g. "100 Mbps".
    pub bandwidth: String,
    pub location: String,
    pub mux_id: String,
    pub port_id: String,
    pub last_updated: DateTime<Utc>,
}

impl CircuitRecord {
    /// Read a user-entered field by identifier.
    pub fn field(&self, field: CircuitField) -> &str {
        match field {
            CircuitField::CircuitId => &self.circuit_id,
            CircuitField::ClientName => &self.client_name,
            CircuitField::ClientIp => &self.client_ip,
            CircuitField::Subnet => &self.subnet,
            CircuitField::Dns => &self.dns,
            CircuitField::Vlan => &self.vlan,
            CircuitField::Bandwidth => &self.bandwidth,
            CircuitField::Location => &self.location,
            CircuitField::MuxId => &self.mux_id,
            CircuitField::PortId => &self.port_id,
        }
    }

    /// Snapshot the record into an editable draft. The edit flow works on
    /// the draft and only writes back through [`CircuitDraft::merge_into`],
    /// so canceling leaves the original untouched.
    pub fn to_draft(&self) -> CircuitDraft {
        CircuitDraft {
            circuit_id: self.circuit_id.clone(),
            client_name: self.client_name.clone(),
            client_ip: self.client_ip.clone(),
            subnet: self.subnet.clone(),
            dns: self.dns.clone(),
            vlan: self.vlan.clone(),
            bandwidth: self.bandwidth.clone(),
            location: self.location.clone(),
            mux_id: self.mux_id.clone(),
            port_id: self.port_id.clone(),
        }
    }
}

/// Raw form input for a circuit, prior to validation. Field values are
/// free text exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircuitDraft {
    pub circuit_id: String,
    pub client_name: String,
    pub client_ip: String,
    pub subnet: String,
    pub dns: String,
    pub vlan: String,
    pub bandwidth: String,
    pub location: String,
    pub mux_id: String,
    pub port_id: String,
}

impl CircuitDraft {
    pub fn field(&self, field: CircuitField) -> &str {
        match field {
            CircuitField::CircuitId => &self.circuit_id,
            CircuitField::ClientName => &self.client_name,
            CircuitField::ClientIp => &self.client_ip,
            CircuitField::Subnet => &self.subnet,
            CircuitField::Dns => &self.dns,
            CircuitField::Vlan => &self.vlan,
            CircuitField::Bandwidth => &self.bandwidth,
            CircuitField::Location => &self.location,
            CircuitField::MuxId => &self.mux_id,
            CircuitField::PortId => &self.port_id,
        }
    }

    /// Mutable access for form input handling.
    pub fn field_mut(&mut self, field: CircuitField) -> &mut String {
        match field {
            CircuitField::CircuitId => &mut self.circuit_id,
            CircuitField::ClientName => &mut self.client_name,
            CircuitField::ClientIp => &mut self.client_ip,
            CircuitField::Subnet => &mut self.subnet,
            CircuitField::Dns => &mut self.dns,
            CircuitField::Vlan => &mut self.vlan,
            CircuitField::Bandwidth => &mut self.bandwidth,
            CircuitField::Location => &mut self.location,
            CircuitField::MuxId => &mut self.mux_id,
            CircuitField::PortId => &mut self.port_id,
        }
    }

    /// Build a brand-new record from a fully validated registration draft.
    pub fn into_record(self, last_updated: DateTime<Utc>) -> CircuitRecord {
        CircuitRecord {
            circuit_id: self.circuit_id,
            client_name: self.client_name,
            client_ip: self.client_ip,
            subnet: self.subnet,
            dns: self.dns,
            vlan: self.vlan,
            bandwidth: self.bandwidth,
            location: self.location,
            mux_id: self.mux_id,
            port_id: self.port_id,
            last_updated,
        }
    }

    /// Produce an updated record from a validated edit draft. The identity
    /// comes from `original`, never from the draft, and `last_updated` is
    /// stamped fresh.
    pub fn merge_into(&self, original: &CircuitRecord, now: DateTime<Utc>) -> CircuitRecord {
        CircuitRecord {
            circuit_id: original.circuit_id.clone(),
            client_name: self.client_name.clone(),
            client_ip: self.client_ip.clone(),
            subnet: self.subnet.clone(),
            dns: self.dns.clone(),
            vlan: self.vlan.clone(),
            bandwidth: self.bandwidth.clone(),
            location: self.location.clone(),
            mux_id: self.mux_id.clone(),
            port_id: self.port_id.clone(),
            last_updated: now,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> CircuitRecord {
        CircuitRecord {
            circuit_id: "CKT-9000".into(),
            client_name: "Example Co".into(),
            client_ip: "10.4.0.12".into(),
            subnet: "255.255.255.0".into(),
            dns: "10.4.0.2".into(),
            vlan: "120".into(),
            bandwidth: "200 Mbps".into(),
            location: "POP-West".into(),
            mux_id: "MUX-07".into(),
            port_id: "PORT-14".into(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn draft_round_trips_user_fields() {
        let record = sample();
        let draft = record.to_draft();
        for field in CircuitField::ALL {
            assert_eq!(draft.field(field), record.field(field));
        }
    }

    #[test]
    fn merge_into_keeps_identity_and_restamps() {
        let record = sample();
        let mut draft = record.to_draft();
        draft.circuit_id = "CKT-TAMPERED".into();
        draft.client_name = "Renamed Co".into();

        let now = Utc::now();
        let merged = draft.merge_into(&record, now);
        assert_eq!(merged.circuit_id, "CKT-9000");
        assert_eq!(merged.client_name, "Renamed Co");
        assert_eq!(merged.last_updated, now);
    }
}
