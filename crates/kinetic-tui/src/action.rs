//! All possible UI actions. Actions are the sole mechanism for state mutation.

use kinetic_core::{Device, Metric, MountId};

/// Every state transition in the TUI is expressed as an Action.
///
/// Fetch results carry the id of the mount that requested them so the app
/// can drop anything addressed to a view that is gone.
#[derive(Debug)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,

    // ── Navigation ────────────────────────────────────────────────
    /// Open the detail view for this device.
    SelectDevice(Device),
    /// Clear the selection and return to the list.
    Back,

    // ── Data Events ───────────────────────────────────────────────
    DevicesLoaded {
        mount: MountId,
        result: Result<Vec<Device>, kinetic_core::ApiError>,
    },
    MetricsLoaded {
        mount: MountId,
        result: Result<Vec<Metric>, kinetic_core::ApiError>,
    },

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Cursor / Scrolling ────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
}
