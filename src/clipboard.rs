//! The external clipboard collaborator.
//!
//! The OS clipboard API itself is out of scope for this core; it sits
//! behind [`SystemClipboard`] so the store and poller stay testable. The
//! shipped implementation is a thin binding over `arboard`.

use std::io::Cursor;

use tracing::debug;

use crate::error::{HistoryError, Result};
use crate::models::{ClipboardItem, RawClipboardSnapshot};

/// OS-provided clipboard, reduced to the two operations the core needs.
pub trait SystemClipboard: Send + Sync {
    /// Read one snapshot of the clipboard's available typed
    /// representations. Absent representations are simply `None`/empty.
    fn read(&self) -> Result<RawClipboardSnapshot>;

    /// Set the clipboard to the representation matching the item's type,
    /// clearing prior content first.
    fn write(&self, item: &ClipboardItem) -> Result<()>;
}

/// `arboard`-backed system clipboard.
///
/// A fresh `arboard::Clipboard` is opened per call; the handle is not
/// `Sync` on every platform and the poll cadence is low enough that
/// reopening costs nothing we care about.
///
/// arboard exposes no file-list representation, so snapshots never carry
/// `file_paths` and a `FileReference` write falls back to writing the
/// path as plain text.
#[derive(Debug, Default)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl SystemClipboard for ArboardClipboard {
    fn read(&self) -> Result<RawClipboardSnapshot> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| HistoryError::ClipboardRead(e.to_string()))?;

        let text = clipboard.get_text().ok();
        let image = clipboard.get_image().ok().and_then(|img| encode_png(&img));

        Ok(RawClipboardSnapshot {
            text,
            image,
            file_paths: Vec::new(),
        })
    }

    fn write(&self, item: &ClipboardItem) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| HistoryError::ClipboardWrite(e.to_string()))?;
        clipboard
            .clear()
            .map_err(|e| HistoryError::ClipboardWrite(e.to_string()))?;

        match item {
            ClipboardItem::Text(text) => clipboard
                .set_text(text.clone())
                .map_err(|e| HistoryError::ClipboardWrite(e.to_string())),
            ClipboardItem::Image(bytes) => {
                let img = decode_rgba(bytes)?;
                clipboard
                    .set_image(img)
                    .map_err(|e| HistoryError::ClipboardWrite(e.to_string()))
            }
            ClipboardItem::FileReference(path) => {
                debug!(%path, "no native file-list representation, writing path as text");
                clipboard
                    .set_text(path.clone())
                    .map_err(|e| HistoryError::ClipboardWrite(e.to_string()))
            }
        }
    }
}

/// Encode an arboard RGBA frame as PNG bytes. Returns `None` when the
/// frame dimensions don't match its buffer.
fn encode_png(img: &arboard::ImageData<'_>) -> Option<Vec<u8>> {
    let buf = image::RgbaImage::from_raw(
        img.width as u32,
        img.height as u32,
        img.bytes.clone().into_owned(),
    )?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(buf)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .ok()?;
    Some(out)
}

fn decode_rgba(bytes: &[u8]) -> Result<arboard::ImageData<'static>> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| HistoryError::ClipboardWrite(format!("image decode: {e}")))?;
    let rgba = img.to_rgba8();
    Ok(arboard::ImageData {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        bytes: rgba.into_raw().into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_png_rejects_mismatched_dimensions() {
        let img = arboard::ImageData {
            width: 4,
            height: 4,
            bytes: vec![0u8; 3].into(), // far too short for 4x4 RGBA
        };
        assert!(encode_png(&img).is_none());
    }

    #[test]
    fn encode_png_roundtrips_through_decode() {
        let img = arboard::ImageData {
            width: 2,
            height: 1,
            bytes: vec![255, 0, 0, 255, 0, 255, 0, 255].into(),
        };
        let png = encode_png(&img).unwrap();
        let back = decode_rgba(&png).unwrap();
        assert_eq!(back.width, 2);
        assert_eq!(back.height, 1);
        assert_eq!(back.bytes.as_ref(), img.bytes.as_ref());
    }
}
