// ── View state ──
//
// Plain state machines for the list and detail screens and the root that
// switches between them. Rendering lives in the TUI crate; these types only
// decide what there is to render.

mod detail;
mod list;
mod load;
mod root;

pub use detail::{DetailView, EMPTY_MESSAGE, METRICS_ERROR, MetricsDisplay};
pub use list::{DEVICES_ERROR, ListView};
pub use load::LoadState;
pub use root::{Root, Screen};

#[cfg(test)]
pub(crate) mod fake;
