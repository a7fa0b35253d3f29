//! Physical record layout.
//!
//! Computed once from the canonical column order when a schema is built.

use super::column::ColumnDescriptor;
use crate::limits::{LENGTH_PREFIX_SIZE, ROW_PRESENT_BIT};
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Pre-computed layout constants of an encoded record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLayout {
    /// Null-bitmap bit per column, None for non-nullable columns.
    null_bits: Vec<Option<usize>>,
    /// Size of the null bitmap in bytes: ceil((1 + nullable) / 8)
    header_size: usize,
    /// Number of leading primary-key columns.
    primary_key_count: usize,
    /// Sum of the primary-key column widths.
    primary_key_size: usize,
    /// Header plus every column at its maximum width and length prefix.
    max_record_size: usize,
}

impl RecordLayout {
    /// Computes the layout of columns already in canonical order.
    pub(crate) fn compute(columns: &[Arc<ColumnDescriptor>]) -> Self {
        let mut next_bit = ROW_PRESENT_BIT + 1;
        let null_bits: Vec<Option<usize>> = columns
            .iter()
            .map(|col| {
                col.is_nullable().then(|| {
                    let bit = next_bit;
                    next_bit += 1;
                    bit
                })
            })
            .collect();

        let header_size = (next_bit + 7) / 8;

        let primary_key_count = columns.iter().take_while(|c| c.is_primary_key()).count();
        let primary_key_size = columns[..primary_key_count].iter().map(|c| c.size()).sum();

        let data_size: usize = columns
            .iter()
            .map(|c| {
                if c.is_variable_length() {
                    c.size() + LENGTH_PREFIX_SIZE
                } else {
                    c.size()
                }
            })
            .sum();

        Self {
            null_bits,
            header_size,
            primary_key_count,
            primary_key_size,
            max_record_size: header_size + data_size,
        }
    }

    /// Returns the null-bitmap bit of the column at canonical position `index`.
    #[inline]
    pub fn null_bit(&self, index: usize) -> Option<usize> {
        self.null_bits.get(index).copied().flatten()
    }

    /// Returns the number of nullable columns.
    pub fn nullable_count(&self) -> usize {
        self.null_bits.iter().filter(|b| b.is_some()).count()
    }

    /// Returns the null-bitmap size in bytes.
    #[inline]
    pub fn header_size(&self) -> usize {
        self.header_size
    }

    /// Returns the number of primary-key columns.
    #[inline]
    pub fn primary_key_count(&self) -> usize {
        self.primary_key_count
    }

    /// Returns the byte width of the primary-key encoding.
    #[inline]
    pub fn primary_key_size(&self) -> usize {
        self.primary_key_size
    }

    /// Returns the largest possible encoded record size.
    #[inline]
    pub fn max_record_size(&self) -> usize {
        self.max_record_size
    }
}
