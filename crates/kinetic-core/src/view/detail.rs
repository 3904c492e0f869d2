// ── Device detail view ──

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use kinetic_api::{Device, Error, Metric, TimeRange};

use crate::fetch::{Mount, MountId, spawn_fetch};
use crate::metrics::{MetricGroup, group_metrics};
use crate::service::DeviceService;
use crate::view::LoadState;

pub const METRICS_ERROR: &str = "Failed to fetch device metrics";
pub const EMPTY_MESSAGE: &str = "No metrics available for the last 24 hours";

/// Render state of the metrics area. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricsDisplay<'a> {
    Loading,
    Error(&'static str),
    Empty(&'static str),
    Groups(&'a [MetricGroup]),
}

/// Metrics for one selected device over the trailing 24 hours.
#[derive(Debug)]
pub struct DetailView {
    mount: Mount,
    device: Device,
    window: TimeRange,
    fetch_enabled: bool,
    started: bool,
    state: LoadState<Vec<MetricGroup>>,
}

impl DetailView {
    /// Mount a detail view for `device`. The window is fixed here and does
    /// not slide while the view stays up.
    pub fn new(device: Device, now: DateTime<Utc>, fetch_enabled: bool) -> Self {
        Self {
            mount: Mount::new(),
            device,
            window: TimeRange::trailing(now, Duration::hours(24)),
            fetch_enabled,
            started: false,
            state: LoadState::Loading,
        }
    }

    pub fn mount_id(&self) -> MountId {
        self.mount.id()
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn window(&self) -> &TimeRange {
        &self.window
    }

    pub fn fetch_enabled(&self) -> bool {
        self.fetch_enabled
    }

    pub fn state(&self) -> &LoadState<Vec<MetricGroup>> {
        &self.state
    }

    /// Request metrics for the window. With fetching disabled nothing is
    /// sent and the view stays in `Loading`.
    pub fn start<S, D>(&mut self, service: &Arc<S>, deliver: D) -> Option<JoinHandle<()>>
    where
        S: DeviceService,
        D: FnOnce(MountId, Result<Vec<Metric>, Error>) + Send + 'static,
    {
        if self.started {
            return None;
        }
        self.started = true;
        if !self.fetch_enabled {
            debug!(device_id = %self.device.id, "metrics fetch disabled");
            return None;
        }

        let service = Arc::clone(service);
        let device_id = self.device.id.clone();
        let window = self.window;
        debug!(%device_id, start = %window.start, end = %window.end, "fetching device metrics");
        Some(spawn_fetch(
            &self.mount,
            async move { service.get_device_metrics(&device_id, Some(&window)).await },
            deliver,
        ))
    }

    /// Apply a fetch result. Results for another mount are ignored.
    pub fn apply(&mut self, id: MountId, result: Result<Vec<Metric>, Error>) -> bool {
        if !self.mount.accepts(id) {
            debug!(?id, "discarding metrics result for stale mount");
            return false;
        }
        self.state = match result {
            Ok(metrics) => LoadState::Ready(group_metrics(&metrics)),
            Err(e) => {
                warn!(device_id = %self.device.id, error = %e, "error fetching metrics");
                LoadState::Failed(METRICS_ERROR)
            }
        };
        true
    }

    pub fn display(&self) -> MetricsDisplay<'_> {
        match &self.state {
            LoadState::Loading => MetricsDisplay::Loading,
            LoadState::Failed(message) => MetricsDisplay::Error(*message),
            LoadState::Ready(groups) if groups.is_empty() => MetricsDisplay::Empty(EMPTY_MESSAGE),
            LoadState::Ready(groups) => MetricsDisplay::Groups(groups),
        }
    }

    pub fn teardown(&self) {
        self.mount.teardown();
    }
}
