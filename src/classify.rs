//! Snapshot classification: turns a raw clipboard snapshot into zero or
//! more candidate history items.
//!
//! Representations are considered in a fixed priority — text, then image,
//! then file paths — and every representation present yields its own
//! candidate. Each candidate is size-guarded here; deduplication happens
//! later in the store.

use std::fs;
use std::io::Cursor;

use tracing::{debug, warn};

use crate::models::{ClipboardItem, RawClipboardSnapshot};

/// Per-item payload ceiling: 4 MiB.
pub const MAX_ITEM_BYTES: usize = 4 * 1024 * 1024;

/// Classify a snapshot into size-guarded candidates, in priority order.
pub fn classify(snapshot: &RawClipboardSnapshot) -> Vec<ClipboardItem> {
    let mut candidates = Vec::new();

    if let Some(text) = snapshot.text.as_deref() {
        if text.is_empty() {
            debug!("classify: skipping empty text representation");
        } else if text.len() > MAX_ITEM_BYTES {
            debug!(bytes = text.len(), "classify: dropping oversized text");
        } else {
            candidates.push(ClipboardItem::Text(text.to_string()));
        }
    }

    if let Some(bytes) = snapshot.image.as_deref() {
        if bytes.is_empty() {
            debug!("classify: skipping empty image representation");
        } else if bytes.len() > MAX_ITEM_BYTES {
            debug!(bytes = bytes.len(), "classify: dropping oversized image");
        } else {
            candidates.push(ClipboardItem::Image(canonicalize_image(bytes)));
        }
    }

    for path in &snapshot.file_paths {
        let size = resolved_file_size(path);
        if size > MAX_ITEM_BYTES as u64 {
            debug!(%path, bytes = size, "classify: dropping oversized file");
        } else {
            candidates.push(ClipboardItem::FileReference(path.clone()));
        }
    }

    candidates
}

/// Re-encode image bytes to PNG so that identical copies compare
/// bit-identical regardless of the source format. Bytes that don't decode
/// are kept as-is rather than dropped.
fn canonicalize_image(bytes: &[u8]) -> Vec<u8> {
    let img = match image::load_from_memory(bytes) {
        Ok(img) => img,
        Err(err) => {
            warn!("classify: image bytes not decodable, keeping raw: {err}");
            return bytes.to_vec();
        }
    };

    let mut buf = Vec::new();
    match img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png) {
        Ok(()) => buf,
        Err(err) => {
            warn!("classify: PNG re-encode failed, keeping raw: {err}");
            bytes.to_vec()
        }
    }
}

/// On-disk size of a file path. Stat failure counts as zero — the
/// candidate is kept, not dropped, and the failure is only warned about.
fn resolved_file_size(path: &str) -> u64 {
    match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) => {
            warn!(%path, "classify: failed to resolve file size, treating as 0: {err}");
            0
        }
    }
}
