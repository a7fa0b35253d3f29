//! Null bitmap that heads every encoded record.

use alloc::vec;
use alloc::vec::Vec;
use protodb_core::limits::ROW_PRESENT_BIT;

/// Bit set where bit `i` lives in byte `i / 8` at position `i % 8`.
///
/// Bit 0 flags the record as present; the following bits belong to the
/// nullable columns, a set bit meaning the value is absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullBitmap {
    bytes: Vec<u8>,
}

impl NullBitmap {
    /// Creates a cleared bitmap of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Creates a bitmap over existing header bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Sets a bit. Bits past the end are ignored.
    #[inline]
    pub fn set(&mut self, bit: usize) {
        if let Some(byte) = self.bytes.get_mut(bit / 8) {
            *byte |= 1 << (bit % 8);
        }
    }

    /// Returns true if a bit is set.
    #[inline]
    pub fn is_set(&self, bit: usize) -> bool {
        self.bytes
            .get(bit / 8)
            .is_some_and(|byte| byte & (1 << (bit % 8)) != 0)
    }

    /// Flags the record as present.
    #[inline]
    pub fn mark_present(&mut self) {
        self.set(ROW_PRESENT_BIT);
    }

    /// Returns true if the record is flagged present.
    #[inline]
    pub fn is_present(&self) -> bool {
        self.is_set(ROW_PRESENT_BIT)
    }

    /// Returns the bitmap bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true for a zero-sized bitmap.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
