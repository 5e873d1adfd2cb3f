//! Log Module
//!
//! The append-only record log: binary record format, the append/positioned
//! read handle, and startup replay.
//!
//! ## File Format
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │ Record 1                                                  │
//! │ ┌───────────────┬──────────────┬────────────────┬───┬───┐ │
//! │ │ Timestamp (4) │ KeySize (4)  │ ValueSize (4)  │Key│Val│ │
//! │ └───────────────┴──────────────┴────────────────┴───┴───┘ │
//! ├───────────────────────────────────────────────────────────┤
//! │ Record 2                                                  │
//! │ ...                                                       │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! All header fields are big-endian u32. Records sit back to back with no
//! magic number, version marker, separator or footer.

mod record;
mod writer;
mod reader;
mod recovery;

pub use record::{
    decode_body, decode_header, decode_record, encode_header, encode_record, Record,
    RecordHeader, HEADER_SIZE,
};
pub use writer::LogWriter;
pub use reader::{LogReader, ScannedRecord};
pub use recovery::{LogRecovery, RecoveryResult};
