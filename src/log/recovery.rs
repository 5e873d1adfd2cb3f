//! Log Recovery
//!
//! Rebuilds the KeyDir on startup by replaying the log front to back.

use std::path::Path;

use crate::error::Result;
use crate::keydir::{KeyDir, KeyEntry};

use super::reader::{LogReader, ScannedRecord};

/// Handles replay of an existing log
pub struct LogRecovery;

/// Result of a recovery scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Number of complete records replayed
    pub records_recovered: u64,

    /// End offset of the last complete record
    pub valid_len: u64,

    /// Physical file length at scan time
    pub file_len: u64,

    /// Whether bytes past the last complete record were found
    pub was_truncated: bool,
}

impl RecoveryResult {
    /// Bytes belonging to a torn trailing record
    pub fn discarded_bytes(&self) -> u64 {
        self.file_len - self.valid_len
    }
}

impl LogRecovery {
    /// Replay the log at `path` into a fresh KeyDir
    ///
    /// This will:
    /// 1. Read records in file order
    /// 2. Insert each key, later records replacing earlier ones
    /// 3. Stop at the first short header or short body
    ///
    /// The file itself is not modified; cutting off a torn tail is left to
    /// the writer that reopens it.
    pub fn recover(path: &Path) -> Result<(KeyDir, RecoveryResult)> {
        let mut keydir = KeyDir::new();

        let result = Self::scan(path, |record| {
            let entry = KeyEntry::new(record.entry_size(), record.pos, record.header.timestamp);
            keydir.insert(record.key, entry);
        })?;

        tracing::info!(
            "Recovered {} records ({} live keys) from {}",
            result.records_recovered,
            keydir.len(),
            path.display()
        );
        if result.was_truncated {
            tracing::warn!(
                "Torn record at offset {} ({} bytes) will be discarded",
                result.valid_len,
                result.discarded_bytes()
            );
        }

        Ok((keydir, result))
    }

    /// Scan the log at `path` without building an index or modifying it
    pub fn verify(path: &Path) -> Result<RecoveryResult> {
        Self::scan(path, |_| {})
    }

    fn scan<F>(path: &Path, mut apply: F) -> Result<RecoveryResult>
    where
        F: FnMut(ScannedRecord),
    {
        let mut reader = LogReader::open(path)?;
        let mut records_recovered = 0;

        while let Some(record) = reader.next_record()? {
            tracing::trace!(
                "Replaying record at offset {} ({} bytes)",
                record.pos,
                record.entry_size()
            );
            apply(record);
            records_recovered += 1;
        }

        let valid_len = reader.position();
        let file_len = reader.file_len();

        Ok(RecoveryResult {
            records_recovered,
            valid_len,
            file_len,
            was_truncated: valid_len < file_len,
        })
    }
}
