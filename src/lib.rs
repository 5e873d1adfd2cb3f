//! # CaskKV
//!
//! A Bitcask-style log-structured key-value store with:
//! - O(1) sequential appends for every write
//! - O(1) reads: one index lookup plus one positioned disk read
//! - An in-memory KeyDir rebuilt by replaying the log on open
//! - Tolerance of a torn trailing record after a crash
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Store                               │
//! │                 (get / set / delete / close)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   KeyDir    │          │  LogWriter  │
//!   │ (HashMap)   │─ pos ──▶ │(append+read)│
//!   └─────────────┘          └──────┬──────┘
//!          ▲                        │
//!          │ replay                 ▼
//!   ┌──────┴──────┐          ┌─────────────┐
//!   │ LogRecovery │◀──scan── │  Log file   │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use caskkv::Store;
//!
//! let mut store = Store::open_path("anime.db")?;
//! store.set(b"title", b"One Piece")?;
//! assert_eq!(store.get(b"title")?, b"One Piece");
//! store.close()?;
//! # Ok::<(), caskkv::CaskError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod log;
pub mod keydir;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CaskError, Result};
pub use config::{Config, SyncStrategy};
pub use keydir::{KeyDir, KeyEntry};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of CaskKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
