// synohome-core: home mode switch entity over the synohome-api client.
//
// The external automation platform owns polling, entity registration, and
// configuration validation; this crate provides the entity itself.

pub mod config;
pub mod error;
pub mod switch;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_NAME, SwitchConfig};
pub use error::CoreError;
pub use switch::{HomeModeSwitch, ToggleState};
