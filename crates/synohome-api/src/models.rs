// Web API response types
//
// Every Synology web API endpoint wraps its payload in the
// `{ success, data, error }` envelope. `data` stays loosely typed at the
// envelope level because its shape differs per method; operations decode
// it into the typed payloads below.

use serde::Deserialize;

// ── Response envelope ────────────────────────────────────────────────

/// Standard web API response envelope.
///
/// ```json
/// { "success": true, "data": { ... } }
/// { "success": false, "error": { "code": 105 } }
/// ```
///
/// A missing `success` field counts as failure.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Nested error object on unsuccessful responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: i32,
}

// ── Payloads ─────────────────────────────────────────────────────────

/// Per-API entry from a `SYNO.API.Info` query.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiInfoEntry {
    /// Request path relative to `/webapi/` (e.g. `auth.cgi`).
    pub path: String,
    #[serde(default, rename = "minVersion")]
    pub min_version: Option<u32>,
    #[serde(default, rename = "maxVersion")]
    pub max_version: Option<u32>,
}

/// Payload of a successful `SYNO.API.Auth` login.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    /// Opaque session id, passed as `_sid` on every authenticated call.
    pub sid: String,
}

/// Payload of `SYNO.SurveillanceStation.HomeMode` `GetInfo`.
#[derive(Debug, Deserialize)]
pub struct HomeModeInfo {
    pub on: bool,
}
