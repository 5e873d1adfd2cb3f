//! Store Module
//!
//! The key-value store: one append-only log plus the KeyDir pointing into it.
//!
//! ## Responsibilities
//! - Replay the log on open to rebuild the KeyDir
//! - Append a record per `set` and point the key at it
//! - Serve `get` with one index lookup and one positioned read

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Config;
use crate::error::{CaskError, Result};
use crate::keydir::{KeyDir, KeyEntry};
use crate::log::{decode_record, encode_record, LogRecovery, LogWriter};

/// A Bitcask-style log-structured store
///
/// ## Concurrency Model
///
/// None. Every operation runs to completion on the caller's thread, and
/// `set` takes `&mut self`. Callers sharing a store across threads must
/// wrap it in their own lock.
///
/// ## Deletion
///
/// There is no tombstone. Writing an empty value is the delete idiom, and
/// `get` returns an empty value both for such keys and for keys never
/// written.
pub struct Store {
    config: Config,

    /// Append handle; also serves positioned reads
    log: LogWriter,

    /// Key → location of its latest record
    keydir: KeyDir,
}

impl Store {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Replay the existing log (if any) into a KeyDir
    /// 2. Open the log for appending at the end of the last complete record
    /// 3. Ready to serve requests
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let (keydir, valid_len) = if config.path.exists() {
            let (keydir, result) = LogRecovery::recover(&config.path)?;
            (keydir, result.valid_len)
        } else {
            (KeyDir::new(), 0)
        };

        let log = LogWriter::open(&config.path, valid_len, config.sync_strategy)?;

        tracing::debug!(
            "Opened {} with {} keys, write cursor at {}",
            config.path.display(),
            keydir.len(),
            log.write_cursor()
        );

        Ok(Self {
            config,
            log,
            keydir,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified log file
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(Config::builder().path(path.as_ref()).build())
    }

    /// Get the value stored for `key`
    ///
    /// Returns an empty vec when the key is unknown.
    pub fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        let entry = match self.keydir.get(key) {
            Some(entry) => *entry,
            None => return Ok(Vec::new()),
        };

        let bytes = self.log.read_at(entry.entry_pos, entry.entry_size)?;
        let record = decode_record(&bytes)?;

        if self.config.verify_keys && record.key != key {
            return Err(CaskError::Corruption(format!(
                "record at offset {} holds a different key ({} bytes, expected {})",
                entry.entry_pos,
                record.key.len(),
                key.len()
            )));
        }

        Ok(record.value)
    }

    /// Set a key-value pair
    ///
    /// Steps:
    /// 1. Encode the record with the current timestamp
    /// 2. Append it to the log
    /// 3. Point the key at the new record
    ///
    /// The KeyDir is untouched if the append fails.
    pub fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let timestamp = unix_timestamp();
        let (entry_size, bytes) = encode_record(timestamp, key, value)?;

        let entry_pos = self.log.append(&bytes)?;
        self.keydir
            .insert(key.to_vec(), KeyEntry::new(entry_size, entry_pos, timestamp));

        Ok(())
    }

    /// Delete a key by writing an empty value for it
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.set(key, &[])
    }

    /// Force appended records to disk
    pub fn sync(&mut self) -> Result<()> {
        self.log.sync()
    }

    /// Close the store
    ///
    /// Syncs the log and releases the file. The KeyDir goes with the store;
    /// reopening the path rebuilds it from the log.
    pub fn close(mut self) -> Result<()> {
        self.log.sync()?;
        tracing::debug!("Closed {}", self.config.path.display());
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the log file path
    pub fn path(&self) -> &Path {
        self.log.path()
    }

    /// Number of keys in the KeyDir
    pub fn len(&self) -> usize {
        self.keydir.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keydir.is_empty()
    }

    /// Offset the next record will be written at
    pub fn write_cursor(&self) -> u64 {
        self.log.write_cursor()
    }

    /// KeyDir entry for `key`, if indexed
    pub fn entry(&self, key: &[u8]) -> Option<KeyEntry> {
        self.keydir.get(key).copied()
    }

    /// Iterate over indexed keys in arbitrary order
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.keydir.keys()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Seconds since the unix epoch, saturating into u32
fn unix_timestamp() -> u32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    u32::try_from(secs).unwrap_or(u32::MAX)
}
