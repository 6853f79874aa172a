// ── Platform configuration ──
//
// Describes how to reach a Surveillance Station and how to present the
// entity. Deserialized from the automation platform's configuration
// mapping; schema validation beyond types and defaults is the platform's
// job, and this crate never reads config files itself.

use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use synohome_api::{TlsMode, TransportConfig};

/// Default entity display name.
pub const DEFAULT_NAME: &str = "Surveillance Station Home Mode";

const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for a single home mode switch.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchConfig {
    /// Station URL (e.g. `https://nas.local:5001`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    /// Entity display name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout", rename = "timeout")]
    pub timeout_secs: u64,
    /// Verify the station's TLS certificate.
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

fn default_name() -> String {
    DEFAULT_NAME.to_owned()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_verify_ssl() -> bool {
    true
}

impl SwitchConfig {
    /// Minimal config with platform defaults for the optional fields.
    pub fn new(url: Url, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            url,
            username: username.into(),
            password,
            name: default_name(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_ssl: default_verify_ssl(),
        }
    }

    /// Transport settings derived from this config.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: if self.verify_ssl {
                TlsMode::System
            } else {
                TlsMode::DangerAcceptInvalid
            },
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
