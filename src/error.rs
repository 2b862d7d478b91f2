//! Error type for clipboard-history operations.
//!
//! The core deliberately favors availability over strict reporting: a
//! failed clipboard read makes the poller skip a tick, and oversized or
//! duplicate payloads are dropped without error. Only the external
//! clipboard boundary surfaces failures.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("clipboard read failed: {0}")]
    ClipboardRead(String),

    #[error("clipboard write failed: {0}")]
    ClipboardWrite(String),
}
