//! Binary record format for protodb rows.
//!
//! Encodes a row into the compact byte layout stored by the record store and
//! decodes it back into a row bound to its schema.
//!
//! ## Record Format
//!
//! ```text
//! +-------------------------------------------+
//! | bitmap: ceil((1 + nullable) / 8) bytes    |
//! +-------------------------------------------+
//! | col0 | col1 | ... (canonical order)       |
//! +-------------------------------------------+
//!
//! bitmap bit 0        : record present, always set
//! bitmap bits 1..N    : one per nullable column, set = value absent
//! fixed column        : value bytes, zero-padded to the column size
//! variable column     : u32 length (LE) + value bytes
//! absent column       : nothing
//! ```
//!
//! Primary-key bytes are the key columns' zero-padded values in canonical
//! order, with no bitmap and no length prefixes.
//!
//! # Example
//!
//! ```rust
//! use protodb_binary::RecordCodec;
//! use protodb_core::schema::{ColumnDescriptor, Schema};
//! use protodb_core::{DataType, Row};
//!
//! let schema = Schema::builder()
//!     .add_column(ColumnDescriptor::new("id", DataType::Integer).primary_key(true))
//!     .add_column(ColumnDescriptor::string("name", 32).nullable(true))
//!     .build()
//!     .unwrap();
//!
//! let mut row = Row::new();
//! row.set_int("id", 1);
//! row.set_string("name", "Alice");
//!
//! let bytes = schema.encode(&row).unwrap();
//! let decoded = schema.decode_row(&bytes).unwrap();
//! assert_eq!(decoded.get_string("name").unwrap(), Some("Alice"));
//! ```

#![no_std]

extern crate alloc;

mod bitmap;
mod decoder;
mod encoder;

pub use bitmap::NullBitmap;
pub use decoder::{DecodeOptions, RecordDecoder};
pub use encoder::RecordEncoder;

use alloc::vec::Vec;
use protodb_core::{Result, Row, Schema};

/// Conversion between rows and record bytes.
pub trait RecordCodec {
    /// Encodes a row. The row must satisfy the schema; nothing is produced
    /// otherwise.
    fn encode(&self, row: &Row) -> Result<Vec<u8>>;

    /// Decodes record bytes into a row bound to the schema.
    fn decode(&self, bytes: &[u8], options: &DecodeOptions) -> Result<Row>;

    /// Returns the primary-key bytes of a row.
    fn extract_primary_key_bytes(&self, row: &Row) -> Result<Vec<u8>>;

    /// Decodes a full record.
    fn decode_row(&self, bytes: &[u8]) -> Result<Row> {
        self.decode(bytes, &DecodeOptions::new())
    }

    /// Decodes primary-key bytes into a row of the key columns.
    fn decode_key(&self, bytes: &[u8]) -> Result<Row> {
        self.decode(bytes, &DecodeOptions::key())
    }
}

impl RecordCodec for Schema {
    fn encode(&self, row: &Row) -> Result<Vec<u8>> {
        RecordEncoder::new(self).encode_to_vec(row)
    }

    fn decode(&self, bytes: &[u8], options: &DecodeOptions) -> Result<Row> {
        RecordDecoder::new(self, bytes).decode(options)
    }

    fn extract_primary_key_bytes(&self, row: &Row) -> Result<Vec<u8>> {
        RecordEncoder::new(self)
            .encode_primary_key(row)
            .map(<[u8]>::to_vec)
    }
}
