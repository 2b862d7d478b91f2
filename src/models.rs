//! Core data models for the clipboard history tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One distinct piece of clipboard content.
///
/// Items are immutable once created and own their payload outright:
/// `Image` holds a copy of the encoded bitmap bytes, never a handle into
/// the system clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipboardItem {
    /// Plain text.
    Text(String),
    /// Bitmap bytes in the canonical encoding (PNG where decodable).
    Image(Vec<u8>),
    /// A single file path.
    FileReference(String),
}

impl ClipboardItem {
    /// Short tag for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::FileReference(_) => "file",
        }
    }

    /// Single-line preview for list display: whitespace collapsed,
    /// truncated at `max_chars` with an ellipsis.
    pub fn preview(&self, max_chars: usize) -> String {
        match self {
            Self::Text(text) => truncate_chars(&collapse_whitespace(text), max_chars),
            Self::Image(bytes) => format!("Image ({:.1} KB)", bytes.len() as f64 / 1024.0),
            Self::FileReference(path) => truncate_chars(path, max_chars),
        }
    }
}

/// A history entry: the captured item plus when it was seen.
///
/// Dedup and eviction look only at `item`; `copied_at` is display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub item: ClipboardItem,
    pub copied_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(item: ClipboardItem) -> Self {
        Self {
            item,
            copied_at: Utc::now(),
        }
    }
}

/// One point-in-time read of the system clipboard's typed representations.
///
/// A snapshot may carry several representations at once (e.g. both a text
/// and an image rendering of the same copy); each is classified
/// independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClipboardSnapshot {
    pub text: Option<String>,
    pub image: Option<Vec<u8>>,
    pub file_paths: Vec<String>,
}

impl RawClipboardSnapshot {
    /// True when no representation is present.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.image.is_none() && self.file_paths.is_empty()
    }

    /// Snapshot carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Snapshot carrying only image bytes.
    pub fn image(bytes: Vec<u8>) -> Self {
        Self {
            image: Some(bytes),
            ..Self::default()
        }
    }

    /// Snapshot carrying only file paths.
    pub fn files<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            file_paths: paths.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_collapses_whitespace() {
        let item = ClipboardItem::Text("  hello\n\n\tworld  ".to_string());
        assert_eq!(item.preview(80), "hello world");
    }

    #[test]
    fn preview_truncates_with_ellipsis() {
        let item = ClipboardItem::Text("a".repeat(300));
        let preview = item.preview(200);
        assert_eq!(preview.chars().count(), 201);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn preview_for_image_reports_size() {
        let item = ClipboardItem::Image(vec![0u8; 2048]);
        assert_eq!(item.preview(80), "Image (2.0 KB)");
    }

    #[test]
    fn snapshot_emptiness() {
        assert!(RawClipboardSnapshot::default().is_empty());
        assert!(!RawClipboardSnapshot::text("x").is_empty());
        assert!(!RawClipboardSnapshot::image(vec![1]).is_empty());
        assert!(!RawClipboardSnapshot::files(["/tmp/a"]).is_empty());
    }

    #[test]
    fn entry_keeps_item_intact() {
        let entry = HistoryEntry::new(ClipboardItem::FileReference("/tmp/a".into()));
        assert_eq!(entry.item, ClipboardItem::FileReference("/tmp/a".into()));
    }
}
