// ── Session types for the demo login gate ──
//
// The gate is a placeholder: one configured username/password pair,
// compared in memory. It is NOT a security boundary and must never
// grow into one — there is no backend to protect.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Default demo account, used when no override is configured.
pub const DEMO_USERNAME: &str = "admin";
pub const DEMO_PASSWORD: &str = "circuit123";

/// Role attached to every successful login. There is exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

/// An authenticated portal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub started_at: DateTime<Utc>,
}

/// The credential pair the gate checks against. The password rides in a
/// `SecretString` so it never lands in debug output or logs.
#[derive(Debug, Clone)]
pub struct GateCredentials {
    pub username: String,
    pub password: SecretString,
}

impl Default for GateCredentials {
    fn default() -> Self {
        Self {
            username: DEMO_USERNAME.to_owned(),
            password: SecretString::from(DEMO_PASSWORD.to_owned()),
        }
    }
}

impl GateCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Exact comparison of both fields. Any mismatch is reported
    /// identically by the caller, so nothing leaks about which half failed.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose_secret() == password
    }

    /// Session for a successful check.
    pub fn open_session(&self) -> Session {
        Session {
            username: self.username.clone(),
            role: Role::Admin,
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pair_matches_itself() {
        let gate = GateCredentials::default();
        assert!(gate.matches(DEMO_USERNAME, DEMO_PASSWORD));
    }

    #[test]
    fn either_half_wrong_fails() {
        let gate = GateCredentials::new("noc", "s3cret");
        assert!(gate.matches("noc", "s3cret"));
        assert!(!gate.matches("noc", "wrong"));
        assert!(!gate.matches("ops", "s3cret"));
        assert!(!gate.matches("NOC", "s3cret"));
    }

    #[test]
    fn debug_output_hides_password() {
        let gate = GateCredentials::new("noc", "s3cret");
        assert!(!format!("{gate:?}").contains("s3cret"));
    }
}
