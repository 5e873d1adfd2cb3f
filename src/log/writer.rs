//! Log Writer
//!
//! Owns the open log file. Appends always land at the end of the file (the
//! handle is opened in append mode); the same handle also serves positioned
//! reads for `get`, which seek freely without affecting where the next
//! append goes.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::SyncStrategy;
use crate::error::{CaskError, Result};

/// Append handle plus write cursor for a single log file
pub struct LogWriter {
    path: PathBuf,
    file: File,
    /// Offset the next append lands at; equals the file length unless poisoned
    write_cursor: u64,
    sync_strategy: SyncStrategy,
    /// Appends since the last fsync
    unsynced: usize,
    /// Set when a failed append could not be rolled back; the file length
    /// no longer matches `write_cursor`, so further appends are refused
    poisoned: bool,
}

impl LogWriter {
    /// Open or create the log at `path`, positioned to append at `valid_len`
    ///
    /// Bytes past `valid_len` (a torn record left by a crash) are cut off
    /// so the next append overwrites them.
    pub fn open(path: &Path, valid_len: u64, sync_strategy: SyncStrategy) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)?;

        let file_len = file.metadata()?.len();
        if file_len > valid_len {
            tracing::warn!(
                "Discarding {} trailing bytes of {}",
                file_len - valid_len,
                path.display()
            );
            file.set_len(valid_len)?;
            file.sync_all()?;
        } else if file_len < valid_len {
            return Err(CaskError::Corruption(format!(
                "{} shrank to {} bytes, expected at least {}",
                path.display(),
                file_len,
                valid_len
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
            write_cursor: valid_len,
            sync_strategy,
            unsynced: 0,
            poisoned: false,
        })
    }

    /// Append one encoded record, returning the offset it was written at
    ///
    /// Either the whole buffer is written (and synced, if the strategy says
    /// so) or the file is rolled back to its previous length and the error
    /// is returned. If that rollback fails too, the writer is poisoned and
    /// every later append returns `CaskError::WriterPoisoned`.
    pub fn append(&mut self, bytes: &[u8]) -> Result<u64> {
        if self.poisoned {
            return Err(CaskError::WriterPoisoned(format!(
                "{} holds bytes past offset {} from a failed append",
                self.path.display(),
                self.write_cursor
            )));
        }

        let pos = self.write_cursor;

        if let Err(e) = self.write_and_maybe_sync(bytes) {
            self.rollback(pos);
            return Err(e);
        }

        self.write_cursor += bytes.len() as u64;
        tracing::trace!("Appended {} bytes at offset {}", bytes.len(), pos);
        Ok(pos)
    }

    fn write_and_maybe_sync(&mut self, bytes: &[u8]) -> Result<()> {
        self.file.write_all(bytes)?;

        // Counted only once the append is known to stick
        let pending = self.unsynced + 1;
        let due = match self.sync_strategy {
            SyncStrategy::Never => false,
            SyncStrategy::EveryWrite => true,
            SyncStrategy::EveryNWrites { count } => pending >= count,
        };
        if due {
            self.sync()?;
        } else {
            self.unsynced = pending;
        }
        Ok(())
    }

    /// Drop whatever part of a failed append reached the file
    fn rollback(&mut self, pos: u64) {
        if let Err(e) = self.file.set_len(pos) {
            tracing::error!(
                "Failed to roll back {} to offset {}: {}",
                self.path.display(),
                pos,
                e
            );
            self.poisoned = true;
        } else {
            tracing::warn!("Rolled back failed append at offset {}", pos);
        }
    }

    /// Read exactly `len` bytes starting at `pos`
    pub fn read_at(&self, pos: u64, len: u64) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len as usize];
        let mut file = &self.file;

        file.seek(SeekFrom::Start(pos))?;
        match file.read_exact(&mut buf) {
            Ok(()) => Ok(buf),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(CaskError::TruncatedEntry {
                pos,
                expected: len,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        self.unsynced = 0;
        Ok(())
    }

    /// Offset the next append will land at
    pub fn write_cursor(&self) -> u64 {
        self.write_cursor
    }

    /// Whether a failed rollback has disabled appends
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Appends not yet covered by an fsync
    pub fn unsynced_count(&self) -> usize {
        self.unsynced
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
