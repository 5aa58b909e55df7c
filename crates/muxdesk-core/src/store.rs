//! In-memory circuit record storage.
//!
//! A plain `Vec` with linear search: the dataset is a handful of demo
//! records that live only for the process lifetime, so there is nothing
//! to index or persist. Identifier matching is case-insensitive exact
//! match, first hit wins.

use chrono::Utc;
use tracing::debug;

use crate::model::CircuitRecord;

/// Mock record storage backing the portal.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<CircuitRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the demo dataset.
    pub fn with_demo_records() -> Self {
        Self {
            records: demo_records(),
        }
    }

    /// Case-insensitive exact match on `circuit_id`. Linear scan, first
    /// match wins.
    pub fn find(&self, circuit_id: &str) -> Option<&CircuitRecord> {
        self.records
            .iter()
            .find(|record| record.circuit_id.eq_ignore_ascii_case(circuit_id))
    }

    /// Append a new record. No duplicate check: the original system never
    /// performed one, and `find` returns the earlier record either way.
    pub fn insert(&mut self, record: CircuitRecord) {
        debug!(circuit_id = %record.circuit_id, "inserting circuit record");
        self.records.push(record);
    }

    /// Swap in an updated record over the stored one with the same
    /// identifier. Returns `false` if no such record exists.
    pub fn replace(&mut self, updated: CircuitRecord) -> bool {
        match self
            .records
            .iter_mut()
            .find(|record| record.circuit_id.eq_ignore_ascii_case(&updated.circuit_id))
        {
            Some(slot) => {
                debug!(circuit_id = %updated.circuit_id, "replacing circuit record");
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> &[CircuitRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The fixed demo dataset. Timestamps are stamped at process start --
/// nothing survives a restart, so there is no history to preserve.
pub fn demo_records() -> Vec<CircuitRecord> {
    let seeded = Utc::now();
    [
        (
            "CKT-1001", "Northwind Logistics", "10.10.4.21", "255.255.255.0", "10.10.4.2",
            "210", "500 Mbps", "POP-Seattle", "MUX-A3", "PORT-12",
        ),
        (
            "CKT-1002", "Cascade Medical", "10.10.8.5", "255.255.252.0", "10.10.8.2",
            "220", "1 Gbps", "POP-Seattle", "MUX-A3", "PORT-14",
        ),
        (
            "CKT-1003", "Harborview Freight", "172.16.2.40", "255.255.255.128", "172.16.2.1",
            "310", "200 Mbps", "POP-Tacoma", "MUX-B1", "PORT-03",
        ),
        (
            "CKT-1004", "Evergreen Schools", "192.168.40.10", "255.255.255.0", "192.168.40.1",
            "44", "100 Mbps", "POP-Olympia", "MUX-C2", "PORT-07",
        ),
        (
            "CKT-1005", "Rainier Analytics", "10.22.0.9", "255.255.254.0", "10.22.0.1",
            "1205", "2 Gbps", "POP-Bellevue", "MUX-A7", "PORT-21",
        ),
    ]
    .into_iter()
    .map(
        |(circuit_id, client_name, client_ip, subnet, dns, vlan, bandwidth, location, mux_id, port_id)| {
            CircuitRecord {
                circuit_id: circuit_id.to_owned(),
                client_name: client_name.to_owned(),
                client_ip: client_ip.to_owned(),
                subnet: subnet.to_owned(),
                dns: dns.to_owned(),
                vlan: vlan.to_owned(),
                bandwidth: bandwidth.to_owned(),
                location: location.to_owned(),
                mux_id: mux_id.to_owned(),
                port_id: port_id.to_owned(),
                last_updated: seeded,
            }
        },
    )
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn find_matches_case_insensitively() {
        let store = RecordStore::with_demo_records();
        let record = store.find("ckt-1001").unwrap();
        assert_eq!(record.circuit_id, "CKT-1001");
        assert_eq!(store.find("CkT-1003").unwrap().client_name, "Harborview Freight");
    }

    #[test]
    fn find_misses_unknown_ids() {
        let store = RecordStore::with_demo_records();
        assert!(store.find("CKT-9999").is_none());
        assert!(store.find("").is_none());
    }

    #[test]
    fn insert_then_find() {
        let mut store = RecordStore::new();
        let mut records = demo_records();
        store.insert(records.remove(0));
        assert_eq!(store.len(), 1);
        assert!(store.find("CKT-1001").is_some());
    }

    #[test]
    fn replace_swaps_matching_record() {
        let mut store = RecordStore::with_demo_records();
        let mut updated = store.find("CKT-1002").unwrap().clone();
        updated.bandwidth = "10 Gbps".into();

        assert!(store.replace(updated));
        assert_eq!(store.find("CKT-1002").unwrap().bandwidth, "10 Gbps");
        assert_eq!(store.len(), demo_records().len());
    }

    #[test]
    fn replace_reports_missing_record() {
        let mut store = RecordStore::new();
        let record = demo_records().remove(0);
        assert!(!store.replace(record));
    }
}
