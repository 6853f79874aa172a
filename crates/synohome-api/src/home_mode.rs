// Home mode endpoints
//
// `SYNO.SurveillanceStation.HomeMode` operations: GetInfo and Switch.
// Both run under the retry-on-expiry policy in `client`.

use tracing::debug;

use crate::client::{SurveillanceClient, decode_data};
use crate::error::Error;
use crate::models::HomeModeInfo;

impl SurveillanceClient {
    /// Whether home mode is currently enabled.
    ///
    /// `GET {home_mode}?method=GetInfo` -- returns the station's `on` flag.
    pub async fn home_mode_status(&self) -> Result<bool, Error> {
        let data = self.home_mode_request_with_reauth("GetInfo", &[]).await?;
        let info: HomeModeInfo = decode_data("home mode info", data)?;
        debug!(on = info.on, "home mode status");
        Ok(info.on)
    }

    /// Enable or disable home mode.
    ///
    /// `GET {home_mode}?method=Switch&on={"true"|"false"}` -- the station
    /// expects the flag as a string literal on the wire, so the boolean is
    /// rendered at the boundary.
    ///
    /// Returns the station's success flag. A plain unsuccessful switch
    /// (non-expiry error code) yields `Ok(false)` without re-login; only
    /// an expired session enters the retry path.
    pub async fn home_mode_set_state(&self, on: bool) -> Result<bool, Error> {
        let wire = if on { "true" } else { "false" };
        match self
            .home_mode_request_with_reauth("Switch", &[("on", wire)])
            .await
        {
            Ok(_) => Ok(true),
            Err(Error::InvalidResponse { code, .. }) => {
                debug!(?code, "station rejected home mode switch");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
