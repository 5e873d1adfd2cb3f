//! Error types for CaskKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using CaskError
pub type Result<T> = std::result::Result<T, CaskError>;

/// Unified error type for CaskKV operations
#[derive(Debug, Error)]
pub enum CaskError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Record Codec Errors
    // -------------------------------------------------------------------------
    #[error("Insufficient bytes: needed {needed}, got {available}")]
    InsufficientBytes { needed: usize, available: usize },

    #[error("{field} of {len} bytes exceeds the u32 length limit")]
    FieldTooLarge { field: &'static str, len: usize },

    // -------------------------------------------------------------------------
    // Log Read Errors
    // -------------------------------------------------------------------------
    #[error("Truncated entry at offset {pos}: expected {expected} bytes")]
    TruncatedEntry { pos: u64, expected: u64 },

    #[error("Log corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Log Write Errors
    // -------------------------------------------------------------------------
    #[error("Log writer poisoned: {0}")]
    WriterPoisoned(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
