//! Fixed-cadence clipboard sampling.
//!
//! One tokio task owns the cadence; every tick performs at most one
//! clipboard read and one ingest. The blocking clipboard read runs on the
//! blocking pool and is awaited before the next tick can fire, so ticks
//! never overlap, and missed ticks are dropped rather than queued.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::clipboard::SystemClipboard;
use crate::store::HistoryStore;

/// Reference sampling cadence.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Fallback tokio runtime for callers without an ambient runtime (e.g. a
/// plain main thread driving the UI). Shared and never dropped.
static FALLBACK_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to create fallback tokio runtime")
});

fn runtime_handle() -> tokio::runtime::Handle {
    tokio::runtime::Handle::try_current().unwrap_or_else(|_| FALLBACK_RUNTIME.handle().clone())
}

/// Drives sampling of the external clipboard on a fixed interval and
/// forwards each snapshot to the [`HistoryStore`].
pub struct Poller {
    store: Arc<HistoryStore>,
    clipboard: Arc<dyn SystemClipboard>,
    interval: Duration,
    cancel: Mutex<Option<CancellationToken>>,
}

impl Poller {
    pub fn new(
        store: Arc<HistoryStore>,
        clipboard: Arc<dyn SystemClipboard>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            clipboard,
            interval,
            cancel: Mutex::new(None),
        }
    }

    pub fn with_default_interval(
        store: Arc<HistoryStore>,
        clipboard: Arc<dyn SystemClipboard>,
    ) -> Self {
        Self::new(store, clipboard, DEFAULT_POLL_INTERVAL)
    }

    /// Begin periodic sampling. Idempotent: calling while already running
    /// leaves the existing sampling task alone.
    pub fn start(&self) {
        let mut slot = self.cancel.lock();
        if slot.as_ref().is_some_and(|token| !token.is_cancelled()) {
            debug!("poller already running");
            return;
        }

        let token = CancellationToken::new();
        *slot = Some(token.clone());

        let store = Arc::clone(&self.store);
        let clipboard = Arc::clone(&self.clipboard);
        let period = self.interval;
        let handle = runtime_handle();
        let blocking = handle.clone();

        handle.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            debug!(period_ms = period.as_millis() as u64, "poller started");

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let store = Arc::clone(&store);
                        let clipboard = Arc::clone(&clipboard);
                        let joined = blocking
                            .spawn_blocking(move || sample(&store, clipboard.as_ref()))
                            .await;
                        if joined.is_err() {
                            warn!("clipboard sampling task panicked, continuing");
                        }
                    }
                }
            }
            debug!("poller stopped");
        });
    }

    /// Cancel sampling. Safe to call when not running.
    pub fn stop(&self) {
        if let Some(token) = self.cancel.lock().take() {
            token.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.cancel
            .lock()
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One tick: read a snapshot, hand it to the store. A failed or empty
/// read is a no-op — the next tick is the retry.
fn sample(store: &HistoryStore, clipboard: &dyn SystemClipboard) {
    match clipboard.read() {
        Ok(snapshot) if snapshot.is_empty() => {}
        Ok(snapshot) => store.ingest(snapshot),
        Err(err) => debug!("clipboard read failed, skipping tick: {err}"),
    }
}
