//! Portal configuration: TOML file plus `MUXDESK_*` environment overrides.
//!
//! Everything here has a sensible default; the portal runs with no config
//! file at all. The credential pair is plaintext on purpose -- it guards a
//! demo dataset, not a backend.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use muxdesk_core::{GateCredentials, model};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub portal: PortalSettings,

    #[serde(default)]
    pub login: LoginSettings,
}

/// Timing knobs for the simulated backend.
#[derive(Debug, Deserialize, Serialize)]
pub struct PortalSettings {
    /// Fixed delay applied to every portal operation, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// How long success notices stay up before the view moves on.
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u64,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            notice_ms: default_notice_ms(),
        }
    }
}

/// Demo gate credentials. Overridable so shared demo machines can pick
/// their own pair; still not a security mechanism.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginSettings {
    #[serde(default = "default_username")]
    pub username: String,

    /// Plaintext -- this is a placeholder gate over mock data.
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

fn default_latency_ms() -> u64 {
    900
}
fn default_notice_ms() -> u64 {
    1500
}
fn default_username() -> String {
    model::DEMO_USERNAME.to_owned()
}
fn default_password() -> String {
    model::DEMO_PASSWORD.to_owned()
}

impl Config {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.portal.latency_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.portal.notice_ms)
    }

    /// Translate the login section into the core gate type (password moves
    /// into a `SecretString` at this boundary).
    pub fn gate_credentials(&self) -> GateCredentials {
        GateCredentials::new(self.login.username.clone(), self.login.password.clone())
    }
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "muxdesk", "muxdesk").map_or_else(
        || PathBuf::from(".muxdesk.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Load config from the default path. A missing file yields defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    load_from(&config_path())
}

/// Load config from an explicit path, with env overrides applied on top.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MUXDESK_").split("__"))
        .extract()?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = load_from(Path::new("/nonexistent/muxdesk.toml")).unwrap();
        assert_eq!(config.portal.latency_ms, 900);
        assert_eq!(config.portal.notice_ms, 1500);
        assert_eq!(config.login.username, "admin");
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[portal]\nlatency_ms = 50\n\n[login]\nusername = \"noc\"\npassword = \"demo\""
        )
        .unwrap();

        let config = load_from(file.path()).unwrap();
        assert_eq!(config.portal.latency_ms, 50);
        assert_eq!(config.portal.notice_ms, 1500);
        assert_eq!(config.login.username, "noc");
        assert!(config.gate_credentials().matches("noc", "demo"));
    }
}
