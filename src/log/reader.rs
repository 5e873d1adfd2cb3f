//! Log Reader
//!
//! Sequential front-to-back scan of an existing log, used by recovery.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::error::Result;

use super::record::{decode_body, decode_header, RecordHeader, HEADER_SIZE};

/// A record found while scanning, without its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedRecord {
    /// Offset of the record's header
    pub pos: u64,
    pub header: RecordHeader,
    pub key: Vec<u8>,
}

impl ScannedRecord {
    pub fn entry_size(&self) -> u64 {
        self.header.entry_size()
    }
}

/// Reads complete records from the start of a log file
pub struct LogReader {
    reader: BufReader<File>,
    /// End offset of the last complete record read
    position: u64,
    /// File length at open time
    file_len: u64,
    /// Set once a short header or body ends the scan
    done: bool,
}

impl LogReader {
    /// Open a log file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();

        Ok(Self {
            reader: BufReader::new(file),
            position: 0,
            file_len,
            done: false,
        })
    }

    /// Read the next complete record
    ///
    /// Returns `Ok(None)` once fewer than `HEADER_SIZE` bytes remain, or when
    /// a header declares a body longer than what is left in the file. Both
    /// cases leave `position()` at the end of the last complete record.
    pub fn next_record(&mut self) -> Result<Option<ScannedRecord>> {
        if self.done {
            return Ok(None);
        }

        let remaining = self.file_len - self.position;
        if remaining < HEADER_SIZE as u64 {
            return self.finish();
        }

        let mut header_buf = [0u8; HEADER_SIZE];
        if !self.fill(&mut header_buf)? {
            return self.finish();
        }
        let header = decode_header(&header_buf)?;

        // Size check happens before allocating, so a garbage header with an
        // enormous length is handled like any other torn tail.
        let body_len = header.body_len();
        if body_len > remaining - HEADER_SIZE as u64 {
            return self.finish();
        }

        let mut body = vec![0u8; body_len as usize];
        if !self.fill(&mut body)? {
            return self.finish();
        }
        let (key, _value) = decode_body(&body, header.key_size)?;
        let key = key.to_vec();

        let pos = self.position;
        self.position += header.entry_size();

        Ok(Some(ScannedRecord { pos, header, key }))
    }

    fn finish(&mut self) -> Result<Option<ScannedRecord>> {
        self.done = true;
        Ok(None)
    }

    /// `read_exact` that reports end-of-file as `false` instead of an error
    fn fill(&mut self, buf: &mut [u8]) -> Result<bool> {
        match self.reader.read_exact(buf) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// End offset of the last complete record read so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Length of the file when it was opened
    pub fn file_len(&self) -> u64 {
        self.file_len
    }
}
