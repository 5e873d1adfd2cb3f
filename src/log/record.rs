//! Log record codec
//!
//! Pure encode/decode of a single `(timestamp, key, value)` record. No file
//! access happens here; callers are responsible for handing over exactly the
//! bytes of one record.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{CaskError, Result};

/// Header size: Timestamp (4) + KeySize (4) + ValueSize (4) = 12 bytes
pub const HEADER_SIZE: usize = 12;

/// Fixed-size record header, all fields big-endian on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Seconds since the unix epoch at write time
    pub timestamp: u32,

    /// Length of the key in bytes
    pub key_size: u32,

    /// Length of the value in bytes
    pub value_size: u32,
}

impl RecordHeader {
    /// Number of bytes following the header (key + value)
    pub fn body_len(&self) -> u64 {
        self.key_size as u64 + self.value_size as u64
    }

    /// Total on-disk length of the record this header starts
    pub fn entry_size(&self) -> u64 {
        HEADER_SIZE as u64 + self.body_len()
    }
}

/// A fully decoded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub timestamp: u32,
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

// =============================================================================
// Header
// =============================================================================

/// Encode the 12-byte record header
pub fn encode_header(timestamp: u32, key_size: u32, value_size: u32) -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    let mut buf = &mut header[..];
    buf.put_u32(timestamp);
    buf.put_u32(key_size);
    buf.put_u32(value_size);
    header
}

/// Decode a record header from the first 12 bytes of `bytes`
pub fn decode_header(bytes: &[u8]) -> Result<RecordHeader> {
    if bytes.len() < HEADER_SIZE {
        return Err(CaskError::InsufficientBytes {
            needed: HEADER_SIZE,
            available: bytes.len(),
        });
    }

    let mut buf = &bytes[..HEADER_SIZE];
    Ok(RecordHeader {
        timestamp: buf.get_u32(),
        key_size: buf.get_u32(),
        value_size: buf.get_u32(),
    })
}

// =============================================================================
// Record
// =============================================================================

/// Encode a record as `header || key || value`
///
/// Returns the total record size together with the encoded bytes.
pub fn encode_record(timestamp: u32, key: &[u8], value: &[u8]) -> Result<(u64, Bytes)> {
    let key_size = field_len("key", key)?;
    let value_size = field_len("value", value)?;

    let total_size = HEADER_SIZE + key.len() + value.len();
    let mut buf = BytesMut::with_capacity(total_size);
    buf.put_slice(&encode_header(timestamp, key_size, value_size));
    buf.put_slice(key);
    buf.put_slice(value);

    Ok((total_size as u64, buf.freeze()))
}

/// Decode a complete record
///
/// `bytes` must hold exactly one record; everything after the key is taken
/// as the value.
pub fn decode_record(bytes: &[u8]) -> Result<Record> {
    let header = decode_header(bytes)?;
    let (key, value) = decode_body(&bytes[HEADER_SIZE..], header.key_size)?;

    Ok(Record {
        timestamp: header.timestamp,
        key: key.to_vec(),
        value: value.to_vec(),
    })
}

/// Split a record body (header already consumed) into key and value
///
/// Borrows from `body`; nothing is copied.
pub fn decode_body(body: &[u8], key_size: u32) -> Result<(&[u8], &[u8])> {
    let key_size = key_size as usize;
    if body.len() < key_size {
        return Err(CaskError::InsufficientBytes {
            needed: key_size,
            available: body.len(),
        });
    }

    Ok(body.split_at(key_size))
}

fn field_len(field: &'static str, bytes: &[u8]) -> Result<u32> {
    u32::try_from(bytes.len()).map_err(|_| CaskError::FieldTooLarge {
        field,
        len: bytes.len(),
    })
}
