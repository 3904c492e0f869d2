// kinetic-core: View state and service wiring between kinetic-api and the TUI.

pub mod config;
pub mod error;
pub mod fetch;
pub mod metrics;
pub mod service;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use fetch::{Mount, MountId};
pub use metrics::{MetricGroup, group_metrics};
pub use service::DeviceService;
pub use view::{
    DEVICES_ERROR, DetailView, EMPTY_MESSAGE, ListView, LoadState, METRICS_ERROR, MetricsDisplay,
    Root, Screen,
};

// Model types come straight from the API crate.
pub use kinetic_api::Error as ApiError;
pub use kinetic_api::{Command, CommandResponse, Device, ExtraInfo, Metric, TimeRange};
