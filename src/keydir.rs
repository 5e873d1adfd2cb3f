//! KeyDir
//!
//! In-memory index mapping every live key to the location of its most recent
//! record in the log. Rebuilt from scratch by replay on every open; never
//! persisted on its own.

use std::collections::HashMap;

/// Location and size of a key's current record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    /// Total record length (header + key + value)
    pub entry_size: u64,

    /// Byte offset of the record's first byte in the log
    pub entry_pos: u64,

    /// Timestamp copied from the record header
    pub timestamp: u32,
}

impl KeyEntry {
    pub fn new(entry_size: u64, entry_pos: u64, timestamp: u32) -> Self {
        Self {
            entry_size,
            entry_pos,
            timestamp,
        }
    }

    /// Offset one past the last byte of the record
    pub fn end_pos(&self) -> u64 {
        self.entry_pos + self.entry_size
    }
}

/// Hash index of key → current `KeyEntry`
///
/// Last insert wins; older records for the same key become dead space in the log.
#[derive(Debug, Default)]
pub struct KeyDir {
    entries: HashMap<Vec<u8>, KeyEntry>,
}

impl KeyDir {
    /// Create an empty KeyDir
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `key`, returning the previous one
    pub fn insert(&mut self, key: Vec<u8>, entry: KeyEntry) -> Option<KeyEntry> {
        self.entries.insert(key, entry)
    }

    pub fn get(&self, key: &[u8]) -> Option<&KeyEntry> {
        self.entries.get(key)
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over indexed keys in arbitrary order
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.keys().map(|k| k.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut keydir = KeyDir::new();
        assert!(keydir.is_empty());

        keydir.insert(b"a".to_vec(), KeyEntry::new(14, 0, 7));

        assert_eq!(keydir.len(), 1);
        assert_eq!(keydir.get(b"a"), Some(&KeyEntry::new(14, 0, 7)));
        assert_eq!(keydir.get(b"b"), None);
    }

    #[test]
    fn test_insert_replaces_previous_entry() {
        let mut keydir = KeyDir::new();
        keydir.insert(b"k".to_vec(), KeyEntry::new(14, 0, 1));

        let previous = keydir.insert(b"k".to_vec(), KeyEntry::new(15, 14, 2));

        assert_eq!(previous, Some(KeyEntry::new(14, 0, 1)));
        assert_eq!(keydir.len(), 1);
        assert_eq!(keydir.get(b"k").map(|e| e.entry_pos), Some(14));
    }

    #[test]
    fn test_end_pos() {
        let entry = KeyEntry::new(20, 100, 0);
        assert_eq!(entry.end_pos(), 120);
    }
}
