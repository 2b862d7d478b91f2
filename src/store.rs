//! Bounded, insertion-ordered clipboard history with type-specific
//! deduplication.
//!
//! Concurrency model: the poller tick is the single writer; display-layer
//! readers and copy-back calls may run concurrently. One mutex around the
//! ordered items and the seen-text set is the only exclusion boundary —
//! at 1 Hz ticks over at most 25 small entries nothing finer is worth it.
//! `copy_to_clipboard` goes straight to the external clipboard and never
//! takes the lock.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

use crate::classify::classify;
use crate::clipboard::SystemClipboard;
use crate::error::Result;
use crate::models::{ClipboardItem, HistoryEntry, RawClipboardSnapshot};

/// Maximum number of history entries kept.
pub const MAX_HISTORY_ITEMS: usize = 25;

struct Inner {
    /// Oldest first.
    items: VecDeque<HistoryEntry>,
    /// Payloads of every text item currently in `items`, kept exactly in
    /// sync: inserted on append, removed on eviction.
    seen_text: HashSet<String>,
}

impl Inner {
    fn new() -> Self {
        Self {
            items: VecDeque::with_capacity(MAX_HISTORY_ITEMS + 1),
            seen_text: HashSet::new(),
        }
    }

    fn tail(&self) -> Option<&ClipboardItem> {
        self.items.back().map(|entry| &entry.item)
    }

    /// Type-specific dedup rule. Text is matched against every live text
    /// payload; images and file references only against the current tail,
    /// and only when the tail has the same type. The tail moves as a
    /// multi-candidate snapshot is applied, so later candidates in the
    /// same batch compare against earlier ones — intentional, observable
    /// behavior.
    fn is_duplicate(&self, candidate: &ClipboardItem) -> bool {
        match candidate {
            ClipboardItem::Text(text) => self.seen_text.contains(text),
            ClipboardItem::Image(bytes) => {
                matches!(self.tail(), Some(ClipboardItem::Image(last)) if last == bytes)
            }
            ClipboardItem::FileReference(path) => {
                matches!(self.tail(), Some(ClipboardItem::FileReference(last)) if last == path)
            }
        }
    }

    /// Append one item and evict the single oldest entry if over capacity.
    fn push(&mut self, item: ClipboardItem) {
        if let ClipboardItem::Text(text) = &item {
            self.seen_text.insert(text.clone());
        }
        self.items.push_back(HistoryEntry::new(item));

        if self.items.len() > MAX_HISTORY_ITEMS {
            if let Some(evicted) = self.items.pop_front() {
                if let ClipboardItem::Text(text) = &evicted.item {
                    self.seen_text.remove(text);
                }
            }
        }
    }

    fn view(&self) -> Vec<HistoryEntry> {
        self.items.iter().cloned().collect()
    }
}

/// Clipboard history store: classification, dedup, bounded FIFO storage,
/// change publication, and copy-back to the system clipboard.
pub struct HistoryStore {
    inner: Mutex<Inner>,
    clipboard: Arc<dyn SystemClipboard>,
    changes: watch::Sender<Vec<HistoryEntry>>,
}

impl HistoryStore {
    pub fn new(clipboard: Arc<dyn SystemClipboard>) -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self {
            inner: Mutex::new(Inner::new()),
            clipboard,
            changes,
        }
    }

    /// Ingest one clipboard snapshot: classify, size-guard, dedup, append
    /// (oldest evicted past capacity). Publishes the updated list to
    /// subscribers when anything changed. Never fails — unrecognized or
    /// rejected content just leaves the history as-is.
    pub fn ingest(&self, snapshot: RawClipboardSnapshot) {
        let candidates = classify(&snapshot);
        if candidates.is_empty() {
            return;
        }

        let published = {
            let mut inner = self.inner.lock();
            let mut mutated = false;
            for candidate in candidates {
                if inner.is_duplicate(&candidate) {
                    debug!(kind = candidate.kind(), "ingest: dropping duplicate");
                    continue;
                }
                debug!(kind = candidate.kind(), "ingest: appending");
                inner.push(candidate);
                mutated = true;
            }
            mutated.then(|| inner.view())
        };

        if let Some(list) = published {
            self.changes.send_replace(list);
        }
    }

    /// Write an item back to the system clipboard in the representation
    /// matching its type. Does not touch the history; the next poll dedups
    /// the re-read copy via the usual rules.
    pub fn copy_to_clipboard(&self, item: &ClipboardItem) -> Result<()> {
        debug!(kind = item.kind(), "copying item back to clipboard");
        self.clipboard.write(item)
    }

    /// Current entries, oldest first. Display layers usually reverse this.
    pub fn snapshot_view(&self) -> Vec<HistoryEntry> {
        self.inner.lock().view()
    }

    /// Receiver holding the most recently published ordered list. The
    /// store publishes on every mutating ingest.
    pub fn subscribe(&self) -> watch::Receiver<Vec<HistoryEntry>> {
        self.changes.subscribe()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }
}
