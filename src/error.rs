//! # Error Types
//!
//! This module defines error types used throughout the receiptline library.
//!
//! Markup faults never surface here: a malformed column is flagged on the
//! parsed column and rendered empty, and an invalid barcode payload encodes
//! to an empty form. What remains are failures of the collaborators around
//! the pipeline.

use thiserror::Error;

/// Main error type for receiptline operations
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The renderer stayed locked by another transform past the timeout
    #[error("Renderer busy: lock not acquired within {timeout_ms} ms")]
    RendererBusy { timeout_ms: u64 },

    /// A command sink call failed
    #[error("Sink error: {0}")]
    Sink(String),

    /// Invalid printer configuration
    #[error("Config error: {0}")]
    Config(String),

    /// JSON (de)serialization error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ReceiptError>;
