// kinetic-api: Async Rust client for Kinetic BAQ device and metrics endpoints

pub mod auth;
pub mod baq;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use auth::Credentials;
pub use client::KineticClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{Command, CommandResponse, Device, ExtraInfo, Metric, TimeRange};
