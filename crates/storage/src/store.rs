//! Record stores.
//!
//! A record store maps record keys to encoded records. The paged file and
//! tree structures behind a persistent store live outside this crate; they
//! plug in through the [`RecordStore`] trait. [`MemoryStore`] is the ordered
//! in-memory implementation.

use crate::key::RecordKey;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::Bound;

/// Byte-sequence store addressed by record keys.
pub trait RecordStore {
    /// Inserts a record. Returns false if the key is already present.
    fn insert(&mut self, key: RecordKey, value: Vec<u8>) -> bool;
    /// Replaces an existing record, returning the previous bytes.
    fn update(&mut self, key: &RecordKey, value: Vec<u8>) -> Option<Vec<u8>>;
    /// Removes a record, returning its bytes.
    fn delete(&mut self, key: &RecordKey) -> Option<Vec<u8>>;
    /// Gets the record stored under a full key.
    fn search(&self, key: &RecordKey) -> Option<&[u8]>;
    /// Gets every record whose key starts with `prefix`, in key order.
    fn partial_search(&self, prefix: &RecordKey) -> Vec<&[u8]>;
    /// Gets the records with keys inside the bounds, in key order.
    fn range(&self, lower: Bound<&RecordKey>, upper: Bound<&RecordKey>) -> Vec<&[u8]>;
    /// Gets every record in key order.
    fn scan(&self) -> Vec<&[u8]>;
    /// Returns the number of records.
    fn len(&self) -> usize;
    /// Returns true if empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory record store backed by an ordered map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<RecordKey, Vec<u8>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over keys and records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &[u8])> {
        self.records.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl RecordStore for MemoryStore {
    fn insert(&mut self, key: RecordKey, value: Vec<u8>) -> bool {
        if self.records.contains_key(&key) {
            return false;
        }
        self.records.insert(key, value);
        true
    }

    fn update(&mut self, key: &RecordKey, value: Vec<u8>) -> Option<Vec<u8>> {
        self.records
            .get_mut(key)
            .map(|slot| core::mem::replace(slot, value))
    }

    fn delete(&mut self, key: &RecordKey) -> Option<Vec<u8>> {
        self.records.remove(key)
    }

    fn search(&self, key: &RecordKey) -> Option<&[u8]> {
        self.records.get(key).map(Vec::as_slice)
    }

    fn partial_search(&self, prefix: &RecordKey) -> Vec<&[u8]> {
        self.records
            .range((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(_, v)| v.as_slice())
            .collect()
    }

    fn range(&self, lower: Bound<&RecordKey>, upper: Bound<&RecordKey>) -> Vec<&[u8]> {
        if is_empty_range(lower, upper) {
            return Vec::new();
        }
        self.records
            .range((lower, upper))
            .map(|(_, v)| v.as_slice())
            .collect()
    }

    fn scan(&self) -> Vec<&[u8]> {
        self.records.values().map(Vec::as_slice).collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// Bounds the ordered map would reject: start after end, or an excluded
/// point range.
fn is_empty_range(lower: Bound<&RecordKey>, upper: Bound<&RecordKey>) -> bool {
    match (lower, upper) {
        (Bound::Included(l), Bound::Included(u)) => l > u,
        (Bound::Included(l) | Bound::Excluded(l), Bound::Excluded(u))
        | (Bound::Excluded(l), Bound::Included(u)) => l >= u,
        _ => false,
    }
}
