//! Portal facade -- the async service surface the UI talks to.
//!
//! There is no backend behind it: every operation sleeps for a fixed
//! configured latency to stand in for the network round-trip that does
//! not exist, then works against the in-memory [`RecordStore`]. The
//! sleeps cannot be canceled and never overlap in practice because the
//! UI disables its trigger control while an operation is pending.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{CircuitDraft, CircuitField, CircuitRecord, GateCredentials, Session};
use crate::store::RecordStore;
use crate::validate::{AddressCheck, validate_fields};

/// Central facade for login, lookup, registration, and editing.
///
/// Cheap to clone; all clones share the same store.
#[derive(Debug, Clone)]
pub struct Portal {
    store: Arc<RwLock<RecordStore>>,
    credentials: GateCredentials,
    latency: Duration,
}

impl Portal {
    pub fn new(store: RecordStore, credentials: GateCredentials, latency: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            credentials,
            latency,
        }
    }

    /// Portal over the demo dataset.
    pub fn with_demo_records(credentials: GateCredentials, latency: Duration) -> Self {
        Self::new(RecordStore::with_demo_records(), credentials, latency)
    }

    /// Check the configured credential pair. This is a demo gate, not a
    /// security mechanism: one hardcoded pair, compared in memory.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, CoreError> {
        self.simulate_latency().await;
        if self.credentials.matches(username, password) {
            let session = self.credentials.open_session();
            info!(username = %session.username, "login accepted");
            Ok(session)
        } else {
            warn!(username, "login rejected");
            Err(CoreError::InvalidCredentials)
        }
    }

    /// Case-insensitive exact-match lookup by circuit identifier.
    pub async fn lookup(&self, circuit_id: &str) -> Result<CircuitRecord, CoreError> {
        self.simulate_latency().await;
        let store = self.store.read().await;
        match store.find(circuit_id) {
            Some(record) => {
                debug!(circuit_id, "lookup hit");
                Ok(record.clone())
            }
            None => {
                debug!(circuit_id, "lookup miss");
                Err(CoreError::not_found(circuit_id))
            }
        }
    }

    /// Validate a registration draft and, if clean, mint the record with a
    /// fresh `last_updated` and add it to the store.
    ///
    /// Address fields are checked for shape only here -- the historical
    /// registration behavior (see DESIGN.md).
    pub async fn register(&self, draft: &CircuitDraft) -> Result<CircuitRecord, CoreError> {
        self.simulate_latency().await;

        let errors = validate_fields(draft, &CircuitField::ALL, AddressCheck::Shape);
        if !errors.is_empty() {
            debug!(failed = errors.len(), "registration rejected by validation");
            return Err(CoreError::Validation(errors));
        }

        let record = draft.clone().into_record(Utc::now());
        info!(circuit_id = %record.circuit_id, client = %record.client_name, "circuit registered");
        self.store.write().await.insert(record.clone());
        Ok(record)
    }

    /// Re-validate the editable subset of an edit draft and, if clean,
    /// replace the stored record, refreshing `last_updated`. The identity
    /// comes from `circuit_id`, never from the draft.
    ///
    /// Unlike registration, address fields here also enforce the ≤255
    /// octet bound.
    pub async fn update(
        &self,
        circuit_id: &str,
        draft: &CircuitDraft,
    ) -> Result<CircuitRecord, CoreError> {
        self.simulate_latency().await;

        let errors = validate_fields(draft, &CircuitField::EDITABLE, AddressCheck::ShapeAndRange);
        if !errors.is_empty() {
            debug!(circuit_id, failed = errors.len(), "update rejected by validation");
            return Err(CoreError::Validation(errors));
        }

        let mut store = self.store.write().await;
        let Some(original) = store.find(circuit_id).cloned() else {
            return Err(CoreError::not_found(circuit_id));
        };

        let updated = draft.merge_into(&original, Utc::now());
        store.replace(updated.clone());
        info!(circuit_id = %updated.circuit_id, "circuit updated");
        Ok(updated)
    }

    /// Number of records currently in the store.
    pub async fn circuit_count(&self) -> usize {
        self.store.read().await.len()
    }

    /// Fixed-delay stand-in for the network call that does not exist.
    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio_test::block_on;

    use super::*;
    use crate::model::Role;

    fn portal() -> Portal {
        Portal::with_demo_records(GateCredentials::default(), Duration::ZERO)
    }

    fn valid_draft() -> CircuitDraft {
        CircuitDraft {
            circuit_id: "CKT-2001".into(),
            client_name: "Pioneer Square Dental".into(),
            client_ip: "10.30.1.12".into(),
            subnet: "255.255.255.0".into(),
            dns: "10.30.1.2".into(),
            vlan: "150".into(),
            bandwidth: "300 Mbps".into(),
            location: "POP-Seattle".into(),
            mux_id: "MUX-B4".into(),
            port_id: "PORT-09".into(),
        }
    }

    #[test]
    fn login_accepts_configured_pair_only() {
        let portal = portal();
        let session = block_on(portal.login("admin", "circuit123")).unwrap();
        assert_eq!(session.username, "admin");
        assert_eq!(session.role, Role::Admin);

        let err = block_on(portal.login("admin", "nope")).unwrap_err();
        assert_eq!(err, CoreError::InvalidCredentials);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let portal = portal();
        let record = block_on(portal.lookup("ckt-1004")).unwrap();
        assert_eq!(record.circuit_id, "CKT-1004");
    }

    #[test]
    fn lookup_miss_names_the_queried_id() {
        let portal = portal();
        let err = block_on(portal.lookup("CKT-0000")).unwrap_err();
        assert_eq!(err.to_string(), "No circuit found matching \"CKT-0000\"");
    }

    #[test]
    fn register_mints_record_and_stores_it() {
        let portal = portal();
        let before = Utc::now();
        let record = block_on(portal.register(&valid_draft())).unwrap();

        assert_eq!(record.circuit_id, "CKT-2001");
        assert!(record.last_updated >= before);
        assert_eq!(block_on(portal.lookup("CKT-2001")).unwrap(), record);
        assert_eq!(block_on(portal.circuit_count()), 6);
    }

    #[test]
    fn register_collects_field_errors() {
        let portal = portal();
        let mut draft = valid_draft();
        draft.vlan = "4095".into();
        draft.bandwidth = "100 Mbs".into();

        let err = block_on(portal.register(&draft)).unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.get(CircuitField::Vlan).is_some());
        assert!(errors.get(CircuitField::Bandwidth).is_some());
        assert_eq!(block_on(portal.circuit_count()), 5);
    }

    #[test]
    fn register_keeps_the_historical_octet_gap() {
        // Shape-only address checking on registration: 999.1.1.1 goes in.
        let portal = portal();
        let mut draft = valid_draft();
        draft.client_ip = "999.1.1.1".into();
        assert!(block_on(portal.register(&draft)).is_ok());
    }

    #[test]
    fn update_rejects_out_of_range_octets() {
        let portal = portal();
        let mut draft = block_on(portal.lookup("CKT-1001")).unwrap().to_draft();
        draft.client_ip = "999.1.1.1".into();

        let err = block_on(portal.update("CKT-1001", &draft)).unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(
            errors.get(CircuitField::ClientIp),
            Some("Client Ip octets must be 255 or less")
        );
    }

    #[test]
    fn update_refreshes_timestamp_and_keeps_identity() {
        let portal = portal();
        let original = block_on(portal.lookup("CKT-1003")).unwrap();
        let mut draft = original.to_draft();
        draft.bandwidth = "400 Mbps".into();
        draft.circuit_id = "CKT-HIJACK".into();

        let updated = block_on(portal.update("ckt-1003", &draft)).unwrap();
        assert_eq!(updated.circuit_id, "CKT-1003");
        assert_eq!(updated.bandwidth, "400 Mbps");
        assert!(updated.last_updated >= original.last_updated);

        let reread = block_on(portal.lookup("CKT-1003")).unwrap();
        assert_eq!(reread, updated);
    }

    #[test]
    fn update_of_unknown_id_is_not_found() {
        let portal = portal();
        let draft = valid_draft();
        let err = block_on(portal.update("CKT-8888", &draft)).unwrap_err();
        assert_eq!(err, CoreError::not_found("CKT-8888"));
    }

    #[test]
    fn abandoned_edit_draft_leaves_store_untouched() {
        let portal = portal();
        let original = block_on(portal.lookup("CKT-1005")).unwrap();

        // Mutate a draft and drop it without calling update -- the cancel path.
        let mut draft = original.to_draft();
        draft.client_name = "Someone Else".into();
        drop(draft);

        assert_eq!(block_on(portal.lookup("CKT-1005")).unwrap(), original);
    }
}
