// ── Core error types ──
//
// Consumer-facing errors from synohome-core. The automation platform never
// sees raw HTTP or JSON failures directly -- the `From<synohome_api::Error>`
// impl translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot reach station at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Station request timed out")]
    Timeout,

    #[error("Station API error: {message}")]
    Api {
        message: String,
        /// The station's numeric error code, if the response carried one.
        code: Option<i32>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<synohome_api::Error> for CoreError {
    fn from(err: synohome_api::Error) -> Self {
        match err {
            synohome_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            synohome_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- re-authentication required".into(),
            },
            synohome_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                    }
                }
            }
            synohome_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            synohome_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            synohome_api::Error::ApiUnavailable { api } => CoreError::Api {
                message: format!("API not available on this station: {api}"),
                code: None,
            },
            synohome_api::Error::InvalidResponse { code, body } => CoreError::Api {
                message: format!("unsuccessful response: {body}"),
                code,
            },
            synohome_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
