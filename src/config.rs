//! Configuration for CaskKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{CaskError, Result};

/// Main configuration for a CaskKV store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the append-only log file. Created on first open.
    pub path: PathBuf,

    /// Sync strategy: how often to fsync the log after appends
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Read Path Configuration
    // -------------------------------------------------------------------------
    /// Check that the key decoded on `get` matches the requested key
    pub verify_keys: bool,
}

/// Log sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Never fsync explicitly; the OS flushes page cache on its own schedule
    Never,

    /// fsync after every append (safest, slowest)
    EveryWrite,

    /// fsync after N unsynced appends
    EveryNWrites { count: usize },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./caskkv.db"),
            sync_strategy: SyncStrategy::Never,
            verify_keys: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the store cannot run with
    pub fn validate(&self) -> Result<()> {
        if let SyncStrategy::EveryNWrites { count: 0 } = self.sync_strategy {
            return Err(CaskError::Config(
                "EveryNWrites requires a count of at least 1".to_string(),
            ));
        }
        if self.path.as_os_str().is_empty() {
            return Err(CaskError::Config("log path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Enable or disable key verification on reads
    pub fn verify_keys(mut self, verify: bool) -> Self {
        self.config.verify_keys = verify;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
