// synohome-api: Async Rust client for the Synology Surveillance Station web API.

pub mod client;
pub mod error;
pub mod home_mode;
pub mod models;
pub mod transport;

pub use client::{ApiEndpoint, SurveillanceClient};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
