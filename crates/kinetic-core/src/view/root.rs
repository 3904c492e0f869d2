// ── Root composition ──
//
// The only navigation state is the selected device. No selection means the
// list is mounted; a selection means the detail view for that device is.
// Switching replaces the mounted view, which tears down its fetches.

use chrono::{DateTime, Utc};
use tracing::debug;

use kinetic_api::{Device, Error, Metric};

use crate::fetch::MountId;
use crate::view::{DetailView, ListView};

#[derive(Debug)]
enum Mounted {
    List(ListView),
    Detail(DetailView),
}

/// Borrowed view of whichever screen is mounted.
#[derive(Debug, Clone, Copy)]
pub enum Screen<'a> {
    List(&'a ListView),
    Detail(&'a DetailView),
}

#[derive(Debug)]
pub struct Root {
    mounted: Mounted,
    metrics_fetch_enabled: bool,
}

impl Root {
    pub fn new(metrics_fetch_enabled: bool) -> Self {
        Self {
            mounted: Mounted::List(ListView::new()),
            metrics_fetch_enabled,
        }
    }

    pub fn metrics_fetch_enabled(&self) -> bool {
        self.metrics_fetch_enabled
    }

    pub fn selected(&self) -> Option<&Device> {
        match &self.mounted {
            Mounted::List(_) => None,
            Mounted::Detail(detail) => Some(detail.device()),
        }
    }

    pub fn screen(&self) -> Screen<'_> {
        match &self.mounted {
            Mounted::List(list) => Screen::List(list),
            Mounted::Detail(detail) => Screen::Detail(detail),
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut ListView> {
        match &mut self.mounted {
            Mounted::List(list) => Some(list),
            Mounted::Detail(_) => None,
        }
    }

    pub fn detail_mut(&mut self) -> Option<&mut DetailView> {
        match &mut self.mounted {
            Mounted::Detail(detail) => Some(detail),
            Mounted::List(_) => None,
        }
    }

    /// Select `device`, mounting its detail view at `now`.
    pub fn select(&mut self, device: Device, now: DateTime<Utc>) {
        debug!(device_id = %device.id, "device selected");
        self.replace(Mounted::Detail(DetailView::new(
            device,
            now,
            self.metrics_fetch_enabled,
        )));
    }

    /// Clear the selection and mount a fresh list.
    pub fn back(&mut self) {
        if self.selected().is_some() {
            debug!("back to device list");
            self.replace(Mounted::List(ListView::new()));
        }
    }

    fn replace(&mut self, next: Mounted) {
        let previous = std::mem::replace(&mut self.mounted, next);
        match previous {
            Mounted::List(list) => list.teardown(),
            Mounted::Detail(detail) => detail.teardown(),
        }
    }

    /// Route a device result to the list, if that mount is still up.
    pub fn apply_devices(&mut self, id: MountId, result: Result<Vec<Device>, Error>) -> bool {
        self.list_mut().is_some_and(|list| list.apply(id, result))
    }

    /// Route a metrics result to the detail view, if that mount is still up.
    pub fn apply_metrics(&mut self, id: MountId, result: Result<Vec<Metric>, Error>) -> bool {
        self.detail_mut()
            .is_some_and(|detail| detail.apply(id, result))
    }
}
