//! Field validation for circuit records.
//!
//! One pure function, [`validate_field`], maps `(field, raw value)` to
//! either `Ok(())` or a human-readable message. Both form flows call the
//! same function; the only divergence between them is the dotted-address
//! depth, expressed as an explicit [`AddressCheck`] chosen per call site.
//!
//! The registration flow historically checked only the *shape* of
//! addresses, while the edit flow also enforced the ≤255 octet bound.
//! That asymmetry is preserved here on purpose rather than silently
//! unified — see DESIGN.md.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{CircuitDraft, CircuitField};

/// Inclusive VLAN tag range.
pub const VLAN_MIN: i64 = 1;
pub const VLAN_MAX: i64 = 4094;

/// Four dot-separated groups of 1–3 digits. Octet range is checked
/// separately, and only in [`AddressCheck::ShapeAndRange`] mode.
static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("dotted-quad pattern")
});

/// Digits, optional whitespace, then a bandwidth unit, case-insensitive.
static BANDWIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\d+\s*(kbps|mbps|gbps)$").expect("bandwidth pattern"));

/// How deep to validate dotted-quad address fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressCheck {
    /// Shape only: four 1–3 digit groups. What the registration flow does.
    Shape,
    /// Shape plus the ≤255 bound on every octet. What the edit flow does.
    ShapeAndRange,
}

/// Validate a single field value. Pure; no side effects.
///
/// A blank or whitespace-only value always fails with
/// "`<Field Name>` is required" before any per-field rule runs.
pub fn validate_field(
    field: CircuitField,
    value: &str,
    address_check: AddressCheck,
) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field.display_name()));
    }

    match field {
        CircuitField::CircuitId
        | CircuitField::Location
        | CircuitField::MuxId
        | CircuitField::PortId => require_min_len(field, value, 3),

        CircuitField::ClientName => require_min_len(field, value, 2),

        CircuitField::ClientIp | CircuitField::Subnet | CircuitField::Dns => {
            if !DOTTED_QUAD.is_match(value) {
                return Err(format!(
                    "{} must be a dotted address like 192.168.1.1",
                    field.display_name()
                ));
            }
            if address_check == AddressCheck::ShapeAndRange && has_octet_over_255(value) {
                return Err(format!(
                    "{} octets must be 255 or less",
                    field.display_name()
                ));
            }
            Ok(())
        }

        CircuitField::Vlan => match value.trim().parse::<i64>() {
            Ok(tag) if (VLAN_MIN..=VLAN_MAX).contains(&tag) => Ok(()),
            _ => Err(format!(
                "Vlan must be a whole number between {VLAN_MIN} and {VLAN_MAX}"
            )),
        },

        CircuitField::Bandwidth => {
            if BANDWIDTH.is_match(value) {
                Ok(())
            } else {
                Err("Bandwidth must be a number followed by Kbps, Mbps, or Gbps".to_owned())
            }
        }
    }
}

fn require_min_len(field: CircuitField, value: &str, min: usize) -> Result<(), String> {
    if value.chars().count() >= min {
        Ok(())
    } else {
        Err(format!(
            "{} must be at least {min} characters",
            field.display_name()
        ))
    }
}

fn has_octet_over_255(value: &str) -> bool {
    value
        .split('.')
        .filter_map(|octet| octet.parse::<u32>().ok())
        .any(|octet| octet > 255)
}

/// At most one error per field, in field order. A form submits only when
/// the pass over its fields comes back empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<CircuitField, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: CircuitField, message: String) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: CircuitField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CircuitField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() == 1 {
            write!(f, "1 field failed validation")
        } else {
            write!(f, "{} fields failed validation", self.0.len())
        }
    }
}

/// Run [`validate_field`] over `fields` of a draft and collect failures.
pub fn validate_fields(
    draft: &CircuitDraft,
    fields: &[CircuitField],
    address_check: AddressCheck,
) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for &field in fields {
        if let Err(message) = validate_field(field, draft.field(field), address_check) {
            errors.insert(field, message);
        }
    }
    errors
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ok(field: CircuitField, value: &str) -> bool {
        validate_field(field, value, AddressCheck::Shape).is_ok()
    }

    #[test]
    fn blank_values_report_required_with_display_name() {
        for (field, expected) in [
            (CircuitField::CircuitId, "Circuit Id is required"),
            (CircuitField::ClientIp, "Client Ip is required"),
            (CircuitField::MuxId, "Mux Id is required"),
            (CircuitField::Vlan, "Vlan is required"),
        ] {
            let err = validate_field(field, "   ", AddressCheck::Shape).unwrap_err();
            assert_eq!(err, expected);
        }
    }

    #[test]
    fn circuit_id_needs_three_chars() {
        assert!(!ok(CircuitField::CircuitId, "ab"));
        assert!(ok(CircuitField::CircuitId, "abc"));
    }

    #[test]
    fn client_name_needs_two_chars() {
        assert!(!ok(CircuitField::ClientName, "x"));
        assert!(ok(CircuitField::ClientName, "xy"));
    }

    #[test]
    fn hardware_fields_need_three_chars() {
        for field in [
            CircuitField::Location,
            CircuitField::MuxId,
            CircuitField::PortId,
        ] {
            assert!(!ok(field, "ab"));
            assert!(ok(field, "POP"));
        }
    }

    #[test]
    fn address_shape_accepts_dotted_quads() {
        for value in ["192.168.1.1", "0.0.0.0", "255.255.255.255", "1.2.3.4"] {
            assert!(ok(CircuitField::ClientIp, value), "{value} should pass");
        }
    }

    #[test]
    fn address_shape_rejects_malformed_values() {
        for value in ["192.168.1", "1.2.3.4.5", "a.b.c.d", "1234.1.1.1", "10,0,0,1"] {
            assert!(!ok(CircuitField::ClientIp, value), "{value} should fail");
        }
    }

    #[test]
    fn registration_mode_accepts_out_of_range_octets() {
        // Shape-only mode mirrors the original registration behavior.
        assert!(validate_field(CircuitField::Subnet, "999.1.1.1", AddressCheck::Shape).is_ok());
    }

    #[test]
    fn edit_mode_rejects_out_of_range_octets_distinctly() {
        let err =
            validate_field(CircuitField::Subnet, "999.1.1.1", AddressCheck::ShapeAndRange)
                .unwrap_err();
        assert_eq!(err, "Subnet octets must be 255 or less");

        let shape_err =
            validate_field(CircuitField::Subnet, "not-an-ip", AddressCheck::ShapeAndRange)
                .unwrap_err();
        assert_ne!(err, shape_err);
    }

    #[test]
    fn edit_mode_still_accepts_valid_addresses() {
        assert!(
            validate_field(CircuitField::Dns, "8.8.8.8", AddressCheck::ShapeAndRange).is_ok()
        );
        assert!(
            validate_field(CircuitField::Dns, "10.255.0.254", AddressCheck::ShapeAndRange)
                .is_ok()
        );
    }

    #[test]
    fn vlan_accepts_exactly_the_closed_range() {
        assert!(ok(CircuitField::Vlan, "1"));
        assert!(ok(CircuitField::Vlan, "4094"));
        assert!(ok(CircuitField::Vlan, "2048"));
        assert!(!ok(CircuitField::Vlan, "0"));
        assert!(!ok(CircuitField::Vlan, "4095"));
        assert!(!ok(CircuitField::Vlan, "-1"));
        assert!(!ok(CircuitField::Vlan, "twelve"));
        assert!(!ok(CircuitField::Vlan, "10.5"));
    }

    #[test]
    fn bandwidth_accepts_units_case_insensitively() {
        for value in ["100 Mbps", "1Gbps", "50 kbps", "10  GBPS"] {
            assert!(ok(CircuitField::Bandwidth, value), "{value} should pass");
        }
    }

    #[test]
    fn bandwidth_rejects_missing_or_bad_units() {
        for value in ["100", "100 Mbs", "Mbps", "ten Mbps", "100 Tbps"] {
            assert!(!ok(CircuitField::Bandwidth, value), "{value} should fail");
        }
    }

    #[test]
    fn full_pass_collects_one_error_per_bad_field() {
        let draft = CircuitDraft {
            circuit_id: "CKT-1".into(),
            client_name: String::new(),
            client_ip: "10.0.0".into(),
            subnet: "255.255.255.0".into(),
            dns: "8.8.8.8".into(),
            vlan: "5000".into(),
            bandwidth: "100".into(),
            location: "POP-East".into(),
            mux_id: "MUX-01".into(),
            port_id: "PORT-02".into(),
        };

        let errors = validate_fields(&draft, &CircuitField::ALL, AddressCheck::Shape);
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(CircuitField::ClientName), Some("Client Name is required"));
        assert!(errors.get(CircuitField::ClientIp).is_some());
        assert!(errors.get(CircuitField::Vlan).is_some());
        assert!(errors.get(CircuitField::Bandwidth).is_some());
        assert!(errors.get(CircuitField::Subnet).is_none());
    }

    #[test]
    fn errors_iterate_in_field_order() {
        let mut errors = FieldErrors::default();
        errors.insert(CircuitField::PortId, "a".into());
        errors.insert(CircuitField::CircuitId, "b".into());
        errors.insert(CircuitField::Vlan, "c".into());

        let order: Vec<CircuitField> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(
            order,
            vec![CircuitField::CircuitId, CircuitField::Vlan, CircuitField::PortId]
        );
    }
}
