// ── Device list view ──

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use kinetic_api::{Device, Error};

use crate::fetch::{Mount, MountId, spawn_fetch};
use crate::service::DeviceService;
use crate::view::LoadState;

pub const DEVICES_ERROR: &str = "Failed to fetch devices";

/// Device collection for one mount, plus the cursor.
///
/// The collection is fetched once per mount. Re-rendering never refetches;
/// only a fresh mount does.
#[derive(Debug, Default)]
pub struct ListView {
    mount: Mount,
    started: bool,
    state: LoadState<Vec<Device>>,
    cursor: usize,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount_id(&self) -> MountId {
        self.mount.id()
    }

    pub fn state(&self) -> &LoadState<Vec<Device>> {
        &self.state
    }

    pub fn devices(&self) -> &[Device] {
        self.state.ready().map(Vec::as_slice).unwrap_or_default()
    }

    /// Kick off the device fetch. Returns `None` if this mount already
    /// started one.
    pub fn start<S, D>(&mut self, service: &Arc<S>, deliver: D) -> Option<JoinHandle<()>>
    where
        S: DeviceService,
        D: FnOnce(MountId, Result<Vec<Device>, Error>) + Send + 'static,
    {
        if self.started {
            return None;
        }
        self.started = true;
        debug!(mount = ?self.mount.id(), "fetching devices");

        let service = Arc::clone(service);
        Some(spawn_fetch(
            &self.mount,
            async move { service.list_devices().await },
            deliver,
        ))
    }

    /// Apply a fetch result. Results for another mount are ignored and
    /// `false` is returned.
    pub fn apply(&mut self, id: MountId, result: Result<Vec<Device>, Error>) -> bool {
        if !self.mount.accepts(id) {
            debug!(?id, "discarding device result for stale mount");
            return false;
        }
        self.state = match result {
            Ok(devices) => {
                debug!(count = devices.len(), "devices loaded");
                LoadState::Ready(devices)
            }
            Err(e) => {
                warn!(error = %e, "error fetching devices");
                LoadState::Failed(DEVICES_ERROR)
            }
        };
        self.cursor = 0;
        true
    }

    // ── Cursor ───────────────────────────────────────────────────────

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn select_next(&mut self) {
        let len = self.devices().len();
        if len > 0 {
            self.cursor = (self.cursor + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub fn select_last(&mut self) {
        self.cursor = self.devices().len().saturating_sub(1);
    }

    /// The device under the cursor, handed upward whole.
    pub fn select_current(&self) -> Option<Device> {
        self.devices().get(self.cursor).cloned()
    }

    pub fn teardown(&self) {
        self.mount.teardown();
    }
}
