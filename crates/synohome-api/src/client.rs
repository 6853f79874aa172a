// Surveillance Station web API HTTP client
//
// Wraps `reqwest::Client` with endpoint discovery, session lifecycle,
// envelope unwrapping, and the retry-on-expiry policy. Domain operations
// (home mode) are implemented as inherent methods in sibling modules to
// keep this one focused on transport mechanics.

use std::collections::HashMap;
use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{ApiInfoEntry, ApiResponse, LoginData};
use crate::transport::TransportConfig;

/// Error code the station returns when the sid is no longer valid.
const CODE_SESSION_EXPIRED: i32 = 105;

/// Session label sent with every login; scopes the sid to the
/// Surveillance Station application.
const SESSION_NAME: &str = "SurveillanceStation";

/// Wire name and pinned version of the authentication API.
const API_AUTH: (&str, u32) = ("SYNO.API.Auth", 2);
/// Wire name and pinned version of the home mode API.
const API_HOME_MODE: (&str, u32) = ("SYNO.SurveillanceStation.HomeMode", 1);

/// A remote API whose request path has been resolved via `SYNO.API.Info`.
#[derive(Debug, Clone)]
pub struct ApiEndpoint {
    /// Wire identifier recognized by the station (e.g. `SYNO.API.Auth`).
    pub api: &'static str,
    /// API version this client speaks. Pinned, not negotiated -- discovery
    /// reports min/max versions but the station accepts anything in range.
    pub version: u32,
    /// Full request URL, composed from the base URL and the discovered path.
    pub url: Url,
}

/// Session-aware client for the Surveillance Station web API.
///
/// Construction is atomic: endpoint discovery and the initial login must
/// both succeed or no client is returned. Home mode operations
/// transparently re-authenticate once when the station reports an expired
/// session; every other failure propagates to the caller unchanged.
pub struct SurveillanceClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    auth: ApiEndpoint,
    home_mode: ApiEndpoint,
    /// Current session id. Replaced wholesale on renewal, never mutated in
    /// place. Requests snapshot it at send time, so concurrent renewals
    /// leave at worst a stale sid that fails back into the same retry path.
    sid: RwLock<String>,
}

impl std::fmt::Debug for SurveillanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials stay out of debug output.
        f.debug_struct("SurveillanceClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("auth", &self.auth)
            .field("home_mode", &self.home_mode)
            .finish_non_exhaustive()
    }
}

impl SurveillanceClient {
    /// Connect to a Surveillance Station.
    ///
    /// Resolves the request paths of the APIs this client needs via a
    /// `SYNO.API.Info` query, then logs in and stores the returned session
    /// id. Fails as a whole if either step fails -- there is no
    /// partially-initialized client.
    pub async fn connect(
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let (auth, home_mode) = discover_endpoints(&http, &base_url).await?;

        let username = username.into();
        let sid = login(&http, &auth, &username, &password).await?;

        Ok(Self {
            http,
            base_url,
            username,
            password,
            auth,
            home_mode,
            sid: RwLock::new(sid),
        })
    }

    /// The station base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The resolved authentication endpoint.
    pub fn auth_endpoint(&self) -> &ApiEndpoint {
        &self.auth
    }

    /// The resolved home mode endpoint.
    pub fn home_mode_endpoint(&self) -> &ApiEndpoint {
        &self.home_mode
    }

    // ── Session management ───────────────────────────────────────────

    /// Snapshot of the current session id.
    pub(crate) fn sid(&self) -> String {
        self.sid.read().expect("sid lock poisoned").clone()
    }

    /// Re-run the login flow and replace the stored session id.
    pub(crate) async fn renew_session(&self) -> Result<(), Error> {
        let sid = login(&self.http, &self.auth, &self.username, &self.password).await?;
        *self.sid.write().expect("sid lock poisoned") = sid;
        Ok(())
    }

    /// End the current session.
    ///
    /// Best-effort teardown: a session the station already expired counts
    /// as logged out.
    pub async fn logout(&self) -> Result<(), Error> {
        debug!(url = %self.auth.url, "logging out");

        let version = self.auth.version.to_string();
        let sid = self.sid();
        let resp = self
            .http
            .get(self.auth.url.clone())
            .query(&[
                ("api", self.auth.api),
                ("method", "Logout"),
                ("version", version.as_str()),
                ("session", SESSION_NAME),
                ("_sid", sid.as_str()),
            ])
            .send()
            .await?;

        match parse_envelope(resp).await {
            Ok(_) | Err(Error::SessionExpired) => Ok(()),
            Err(e) => Err(e),
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Issue an authenticated GET against the home mode API.
    ///
    /// Attaches `api`, `method`, `version`, and the current `_sid`, then
    /// unwraps the envelope.
    pub(crate) async fn home_mode_request(
        &self,
        api_method: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, Error> {
        let endpoint = &self.home_mode;
        debug!(api = endpoint.api, method = api_method, "GET {}", endpoint.url);

        let version = endpoint.version.to_string();
        let sid = self.sid();
        let resp = self
            .http
            .get(endpoint.url.clone())
            .query(&[
                ("api", endpoint.api),
                ("method", api_method),
                ("version", version.as_str()),
            ])
            .query(&params)
            .query(&[("_sid", sid.as_str())])
            .send()
            .await?;

        parse_envelope(resp).await
    }

    /// Run a home mode request under the retry-on-expiry policy.
    ///
    /// If the first attempt fails because the station reports an expired
    /// session, re-login once and retry the request once. Any other error
    /// class, and any failure of the retry itself, propagates unchanged --
    /// at most two attempts per logical operation.
    pub(crate) async fn home_mode_request_with_reauth(
        &self,
        api_method: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, Error> {
        match self.home_mode_request(api_method, params).await {
            Err(Error::SessionExpired) => {
                debug!("session expired, re-authenticating");
                self.renew_session().await?;
                self.home_mode_request(api_method, params).await
            }
            other => other,
        }
    }
}

// ── Construction steps ───────────────────────────────────────────────

/// Resolve the request paths of the required APIs.
///
/// `GET {base}/webapi/query.cgi?api=SYNO.API.Info&method=Query&version=1`
/// with the wire names of the auth and home mode APIs. A missing entry
/// for either fails the whole construction.
async fn discover_endpoints(
    http: &reqwest::Client,
    base_url: &Url,
) -> Result<(ApiEndpoint, ApiEndpoint), Error> {
    let url = webapi_url(base_url, "query.cgi")?;
    let query = format!("{},{}", API_AUTH.0, API_HOME_MODE.0);
    debug!(%url, "querying API info");

    let resp = http
        .get(url)
        .query(&[
            ("api", "SYNO.API.Info"),
            ("method", "Query"),
            ("version", "1"),
            ("query", query.as_str()),
        ])
        .send()
        .await?;

    let data = parse_envelope(resp).await?;
    let mut apis: HashMap<String, ApiInfoEntry> = decode_data("API info", data)?;

    let auth = resolve_endpoint(&mut apis, base_url, API_AUTH)?;
    let home_mode = resolve_endpoint(&mut apis, base_url, API_HOME_MODE)?;
    Ok((auth, home_mode))
}

fn resolve_endpoint(
    apis: &mut HashMap<String, ApiInfoEntry>,
    base_url: &Url,
    (api, version): (&'static str, u32),
) -> Result<ApiEndpoint, Error> {
    let entry = apis.remove(api).ok_or(Error::ApiUnavailable { api })?;
    let url = webapi_url(base_url, &entry.path)?;
    debug!(api, %url, "resolved endpoint");
    Ok(ApiEndpoint { api, version, url })
}

/// Log in and return the issued session id.
///
/// `GET {auth}?api=SYNO.API.Auth&method=Login&...&session=SurveillanceStation&format=sid`
async fn login(
    http: &reqwest::Client,
    auth: &ApiEndpoint,
    username: &str,
    password: &SecretString,
) -> Result<String, Error> {
    debug!(url = %auth.url, account = username, "logging in");

    let version = auth.version.to_string();
    let resp = http
        .get(auth.url.clone())
        .query(&[
            ("api", auth.api),
            ("method", "Login"),
            ("version", version.as_str()),
            ("account", username),
            ("passwd", password.expose_secret()),
            ("session", SESSION_NAME),
            ("format", "sid"),
        ])
        .send()
        .await?;

    // There is no session to expire at login time; any unsuccessful
    // envelope here is a credentials problem.
    let data = match parse_envelope(resp).await {
        Ok(data) => data,
        Err(e @ (Error::SessionExpired | Error::InvalidResponse { .. })) => {
            return Err(Error::Authentication {
                message: e.to_string(),
            });
        }
        Err(other) => return Err(other),
    };

    let login: LoginData = decode_data("login", data)?;
    debug!("login successful");
    Ok(login.sid)
}

// ── Envelope handling ────────────────────────────────────────────────

/// Decode the `{ success, data, error }` envelope, returning `data` on
/// success. A failed envelope with the expired-session code becomes
/// [`Error::SessionExpired`]; any other failure (including a missing
/// `success` field) keeps the raw payload for diagnostics. Non-2xx
/// statuses surface as [`Error::Transport`] before the body is touched.
async fn parse_envelope(resp: reqwest::Response) -> Result<serde_json::Value, Error> {
    let resp = resp.error_for_status()?;
    let body = resp.text().await?;

    let raw: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
        let preview = &body[..body.len().min(200)];
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })?;

    let envelope: ApiResponse =
        serde_json::from_value(raw.clone()).map_err(|e| Error::Deserialization {
            message: format!("response envelope: {e}"),
            body: body.clone(),
        })?;

    if envelope.success {
        return Ok(envelope.data.unwrap_or(serde_json::Value::Null));
    }

    let code = envelope.error.as_ref().map(|e| e.code);
    if code == Some(CODE_SESSION_EXPIRED) {
        return Err(Error::SessionExpired);
    }
    Err(Error::InvalidResponse { code, body: raw })
}

/// Decode a typed payload out of an envelope's `data` field.
pub(crate) fn decode_data<T: DeserializeOwned>(
    what: &str,
    data: serde_json::Value,
) -> Result<T, Error> {
    serde_json::from_value(data.clone()).map_err(|e| Error::Deserialization {
        message: format!("{what} payload: {e}"),
        body: data.to_string(),
    })
}

/// Compose `{base}/webapi/{path}`, tolerating a trailing slash on the base.
fn webapi_url(base_url: &Url, path: &str) -> Result<Url, Error> {
    let base = base_url.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/webapi/{path}"))?)
}
