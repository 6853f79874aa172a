use thiserror::Error;

/// Top-level error type for the `synohome-api` crate.
///
/// Keeps transport failures, session expiry, and application-level
/// failures as distinct variants so the retry policy in `client` is an
/// explicit branch on error kind. `synohome-core` maps these into
/// consumer-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong credentials, account disabled, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The station rejected the session id. Recoverable: the client
    /// re-logs in once and retries before surfacing anything.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, timeout, non-2xx status).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Discovery ───────────────────────────────────────────────────
    /// The `SYNO.API.Info` query did not report a required API.
    #[error("API not available on this station: {api}")]
    ApiUnavailable { api: &'static str },

    // ── Application ─────────────────────────────────────────────────
    /// Unsuccessful response with a non-expiry error code. Carries the
    /// raw decoded payload for diagnostics.
    #[error("Unsuccessful API response (code {code:?})")]
    InvalidResponse {
        code: Option<i32>,
        body: serde_json::Value,
    },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if a fresh login might resolve this error.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Returns `true` for transport-level failures, which are never
    /// retried by this crate.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Tls(_))
    }

    /// Extract the station's error code, if the response carried one.
    pub fn api_error_code(&self) -> Option<i32> {
        match self {
            Self::InvalidResponse { code, .. } => *code,
            _ => None,
        }
    }
}
