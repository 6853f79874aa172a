// ── Home mode switch entity ──
//
// Thin toggle entity over `SurveillanceClient`. Holds only the display
// name and the last polled state; all session logic lives in the client.
// The external platform drives `poll()` on its own schedule and calls
// `turn_on()` / `turn_off()` from user actions.

use tracing::{debug, info};

use synohome_api::SurveillanceClient;

use crate::config::SwitchConfig;
use crate::error::CoreError;

/// On/off state of the switch, recomputed on each poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleState {
    On,
    #[default]
    Off,
}

/// Frontend icon hints per state.
const ICON_ON: &str = "mdi:home-account";
const ICON_OFF: &str = "mdi:home-outline";

/// A switch entity exposing the station's home mode.
///
/// Toggling is fire-and-forget: local state only changes through
/// `poll()`, so the entity reflects what the station last reported rather
/// than what was last requested.
pub struct HomeModeSwitch {
    name: String,
    client: SurveillanceClient,
    state: ToggleState,
}

impl std::fmt::Debug for HomeModeSwitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeModeSwitch")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl HomeModeSwitch {
    /// Wrap an already-connected client. State starts as `Off` until the
    /// first poll.
    pub fn new(name: impl Into<String>, client: SurveillanceClient) -> Self {
        Self {
            name: name.into(),
            client,
            state: ToggleState::Off,
        }
    }

    /// Connect to the station described by `config` and build the entity.
    ///
    /// Fails if endpoint discovery or the initial login fails; no entity
    /// is produced in that case.
    pub async fn setup(config: SwitchConfig) -> Result<Self, CoreError> {
        let client = SurveillanceClient::connect(
            config.url.clone(),
            config.username.clone(),
            config.password.clone(),
            &config.transport(),
        )
        .await?;
        info!(name = %config.name, "home mode switch ready");
        Ok(Self::new(config.name, client))
    }

    /// Entity display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last-known state (refreshed by [`poll()`](Self::poll)).
    pub fn state(&self) -> ToggleState {
        self.state
    }

    /// Whether the last poll saw home mode enabled.
    pub fn is_on(&self) -> bool {
        self.state == ToggleState::On
    }

    /// Frontend icon hint for the current state.
    pub fn icon(&self) -> &'static str {
        match self.state {
            ToggleState::On => ICON_ON,
            ToggleState::Off => ICON_OFF,
        }
    }

    /// Enable home mode.
    ///
    /// Local state is untouched; the next poll picks up the new remote
    /// state.
    pub async fn turn_on(&self) -> Result<(), CoreError> {
        info!("turning on home mode");
        if !self.client.home_mode_set_state(true).await? {
            debug!("station rejected home mode switch");
        }
        Ok(())
    }

    /// Disable home mode.
    pub async fn turn_off(&self) -> Result<(), CoreError> {
        info!("turning off home mode");
        if !self.client.home_mode_set_state(false).await? {
            debug!("station rejected home mode switch");
        }
        Ok(())
    }

    /// Refresh the state from the station.
    ///
    /// Errors propagate to the platform's standard unavailable-entity
    /// handling; nothing is swallowed here.
    pub async fn poll(&mut self) -> Result<(), CoreError> {
        let on = self.client.home_mode_status().await?;
        debug!(on, "polled home mode");
        self.state = if on { ToggleState::On } else { ToggleState::Off };
        Ok(())
    }

    /// Access the underlying API client (e.g. for logout on unload).
    pub fn client(&self) -> &SurveillanceClient {
        &self.client
    }
}
