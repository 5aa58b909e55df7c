// ── Core error types ──
//
// User-facing errors from muxdesk-core. Display strings ARE the UI
// error surface -- screens render them verbatim, so wording changes
// here are behavior changes.

use thiserror::Error;

use crate::validate::FieldErrors;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The login gate rejected the pair. Deliberately generic: the gate
    /// never says which half was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Lookup or update targeted an identifier not in the store.
    #[error("No circuit found matching \"{circuit_id}\"")]
    CircuitNotFound { circuit_id: String },

    /// One or more form fields failed validation. The per-field messages
    /// live inside for inline display.
    #[error("{0}")]
    Validation(FieldErrors),
}

impl CoreError {
    pub fn not_found(circuit_id: impl Into<String>) -> Self {
        Self::CircuitNotFound {
            circuit_id: circuit_id.into(),
        }
    }

    /// The per-field messages, when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::InvalidCredentials | Self::CircuitNotFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_queried_id() {
        let err = CoreError::not_found("CKT-0404");
        assert_eq!(err.to_string(), "No circuit found matching \"CKT-0404\"");
    }

    #[test]
    fn credential_failure_is_generic() {
        assert_eq!(
            CoreError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }
}
