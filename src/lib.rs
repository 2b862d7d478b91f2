//! clipfree-core — clipboard history tracking
//!
//! The core of a clipboard-history app: a poller samples the system
//! clipboard on a fixed cadence, each snapshot is classified into typed
//! items, deduplicated against recent history, and kept in a bounded,
//! insertion-ordered log that can be re-applied to the clipboard. The
//! visual list, highlighting, and window lifecycle live in the consuming
//! presentation layer.
//!
//! # Architecture
//! - `models`: data models (ClipboardItem, HistoryEntry, snapshots)
//! - `classify`: snapshot → size-guarded candidate items
//! - `store`: dedup, bounded FIFO history, change publication, copy-back
//! - `poller`: fixed-interval sampling with start/stop
//! - `clipboard`: the external clipboard behind a trait, arboard binding
//!
//! ```no_run
//! use std::sync::Arc;
//! use clipfree_core::{ArboardClipboard, HistoryStore, Poller, SystemClipboard};
//!
//! let clipboard: Arc<dyn SystemClipboard> = Arc::new(ArboardClipboard::new());
//! let store = Arc::new(HistoryStore::new(Arc::clone(&clipboard)));
//! let poller = Poller::with_default_interval(Arc::clone(&store), clipboard);
//! poller.start();
//! // ... UI consumes store.subscribe() / store.snapshot_view() ...
//! poller.stop();
//! ```

mod classify;
mod clipboard;
mod error;
mod models;
mod poller;
mod store;

pub use classify::{classify, MAX_ITEM_BYTES};
pub use clipboard::{ArboardClipboard, SystemClipboard};
pub use error::{HistoryError, Result};
pub use models::{ClipboardItem, HistoryEntry, RawClipboardSnapshot};
pub use poller::{Poller, DEFAULT_POLL_INTERVAL};
pub use store::{HistoryStore, MAX_HISTORY_ITEMS};
