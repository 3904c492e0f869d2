// ── View mounts and cancellable fetches ──
//
// Every view instance owns a `Mount`. Fetches started by the view race the
// mount's cancellation token, and their results are tagged with the mount
// id, so nothing produced for a torn-down view can land in its successor.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

static NEXT_MOUNT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one view mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(u64);

/// Lifetime handle for one mounted view. Dropping it cancels any fetch
/// still in flight.
#[derive(Debug)]
pub struct Mount {
    id: MountId,
    token: CancellationToken,
}

impl Mount {
    pub fn new() -> Self {
        Self {
            id: MountId(NEXT_MOUNT_ID.fetch_add(1, Ordering::Relaxed)),
            token: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> MountId {
        self.id
    }

    /// A child token for one fetch; cancelled with the mount.
    pub fn token(&self) -> CancellationToken {
        self.token.child_token()
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Whether a result tagged `id` may still be applied here.
    pub fn accepts(&self, id: MountId) -> bool {
        self.id == id && self.is_active()
    }

    pub fn teardown(&self) {
        self.token.cancel();
    }
}

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Await `fut` unless `token` is cancelled first.
pub async fn until_cancelled<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        () = token.cancelled() => None,
        out = fut => Some(out),
    }
}

/// Spawn `fut` on the runtime for `mount`, handing its output to
/// `deliver` only if the mount is still alive when it completes.
pub fn spawn_fetch<F, D>(mount: &Mount, fut: F, deliver: D) -> JoinHandle<()>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
    D: FnOnce(MountId, F::Output) + Send + 'static,
{
    let id = mount.id();
    let token = mount.token();
    tokio::spawn(async move {
        match until_cancelled(&token, fut).await {
            Some(out) if !token.is_cancelled() => deliver(id, out),
            _ => trace!(?id, "fetch cancelled before delivery"),
        }
    })
}
