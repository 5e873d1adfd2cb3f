//! Tests for the log record codec
//!
//! These tests verify:
//! - Header layout (fixed 12 bytes, big-endian field order)
//! - Record layout and round-trips
//! - Explicit failures on short input

use caskkv::log::{
    decode_body, decode_header, decode_record, encode_header, encode_record, Record,
    RecordHeader, HEADER_SIZE,
};
use caskkv::CaskError;

// =============================================================================
// Header Tests
// =============================================================================

#[test]
fn test_header_is_twelve_bytes() {
    assert_eq!(HEADER_SIZE, 12);
    assert_eq!(encode_header(0, 0, 0).len(), 12);
    assert_eq!(encode_header(u32::MAX, u32::MAX, u32::MAX).len(), 12);
}

#[test]
fn test_header_big_endian_field_order() {
    let header = encode_header(0x0102_0304, 5, 0x0A0B_0C0D);

    assert_eq!(
        header,
        [0x01, 0x02, 0x03, 0x04, 0, 0, 0, 5, 0x0A, 0x0B, 0x0C, 0x0D]
    );
}

#[test]
fn test_decode_header() {
    let bytes = encode_header(1_700_000_000, 4, 9);
    let header = decode_header(&bytes).unwrap();

    assert_eq!(
        header,
        RecordHeader {
            timestamp: 1_700_000_000,
            key_size: 4,
            value_size: 9,
        }
    );
    assert_eq!(header.body_len(), 13);
    assert_eq!(header.entry_size(), 25);
}

#[test]
fn test_decode_header_ignores_trailing_bytes() {
    let mut bytes = encode_header(7, 1, 2).to_vec();
    bytes.extend_from_slice(b"kvv");

    let header = decode_header(&bytes).unwrap();
    assert_eq!(header.key_size, 1);
    assert_eq!(header.value_size, 2);
}

#[test]
fn test_decode_header_too_short() {
    let result = decode_header(&[0u8; 11]);

    assert!(matches!(
        result,
        Err(CaskError::InsufficientBytes {
            needed: 12,
            available: 11
        })
    ));
}

#[test]
fn test_decode_header_empty() {
    assert!(matches!(
        decode_header(&[]),
        Err(CaskError::InsufficientBytes { available: 0, .. })
    ));
}

#[test]
fn test_entry_size_does_not_overflow() {
    let header = RecordHeader {
        timestamp: 0,
        key_size: u32::MAX,
        value_size: u32::MAX,
    };

    assert_eq!(header.entry_size(), 12 + 2 * u32::MAX as u64);
}

// =============================================================================
// Record Tests
// =============================================================================

#[test]
fn test_encode_record_layout() {
    let (size, bytes) = encode_record(42, b"name", b"jojo").unwrap();

    assert_eq!(size, 20);
    assert_eq!(bytes.len(), 20);
    assert_eq!(&bytes[..12], &encode_header(42, 4, 4));
    assert_eq!(&bytes[12..16], b"name");
    assert_eq!(&bytes[16..], b"jojo");
}

#[test]
fn test_record_round_trip() {
    let (_, bytes) = encode_record(1_234, b"itadori", b"jujutsu kaisen").unwrap();
    let record = decode_record(&bytes).unwrap();

    assert_eq!(
        record,
        Record {
            timestamp: 1_234,
            key: b"itadori".to_vec(),
            value: b"jujutsu kaisen".to_vec(),
        }
    );
}

#[test]
fn test_record_empty_value() {
    let (size, bytes) = encode_record(9, b"deleted", b"").unwrap();
    assert_eq!(size, 19);

    let record = decode_record(&bytes).unwrap();
    assert_eq!(record.key, b"deleted");
    assert!(record.value.is_empty());
}

#[test]
fn test_record_empty_key_and_value() {
    let (size, bytes) = encode_record(0, b"", b"").unwrap();
    assert_eq!(size, HEADER_SIZE as u64);

    let record = decode_record(&bytes).unwrap();
    assert!(record.key.is_empty());
    assert!(record.value.is_empty());
}

#[test]
fn test_record_binary_payload() {
    let key: Vec<u8> = (0..=255).collect();
    let value = vec![0u8, 0xFF, 0x00, 0x7F];

    let (size, bytes) = encode_record(u32::MAX, &key, &value).unwrap();
    assert_eq!(size, 12 + 256 + 4);

    let record = decode_record(&bytes).unwrap();
    assert_eq!(record.timestamp, u32::MAX);
    assert_eq!(record.key, key);
    assert_eq!(record.value, value);
}

#[test]
fn test_record_large_value() {
    let value = vec![0xABu8; 1024 * 1024];
    let (size, bytes) = encode_record(1, b"big", &value).unwrap();

    assert_eq!(size, 12 + 3 + 1024 * 1024);
    assert_eq!(decode_record(&bytes).unwrap().value, value);
}

#[test]
fn test_decode_record_key_past_end() {
    // Header claims a 10-byte key, only 3 bytes follow
    let mut bytes = encode_header(0, 10, 0).to_vec();
    bytes.extend_from_slice(b"abc");

    assert!(matches!(
        decode_record(&bytes),
        Err(CaskError::InsufficientBytes {
            needed: 10,
            available: 3
        })
    ));
}

// =============================================================================
// Body Tests
// =============================================================================

#[test]
fn test_decode_body_splits_at_key_size() {
    let (key, value) = decode_body(b"lufffyone piece", 6).unwrap();

    assert_eq!(key, b"lufffy");
    assert_eq!(value, b"one piece");
}

#[test]
fn test_decode_body_matches_decode_record() {
    let (_, bytes) = encode_record(5, b"isagi", b"blue lock").unwrap();
    let header = decode_header(&bytes).unwrap();

    let (key, value) = decode_body(&bytes[HEADER_SIZE..], header.key_size).unwrap();
    let record = decode_record(&bytes).unwrap();

    assert_eq!(key, record.key);
    assert_eq!(value, record.value);
}

#[test]
fn test_decode_body_too_short() {
    assert!(matches!(
        decode_body(b"ab", 3),
        Err(CaskError::InsufficientBytes { .. })
    ));
}
