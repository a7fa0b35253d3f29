//! Record decoder.
//!
//! Mirrors the encoder: columns are visited in canonical order, absent
//! nullable columns are skipped by their bitmap bit, and every present
//! column's footprint is consumed whether or not it is kept.

use super::NullBitmap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use hashbrown::HashSet;
use protodb_core::limits::LENGTH_PREFIX_SIZE;
use protodb_core::{Error, Field, RawBuffer, Result, Row, Schema};

/// What to read from a record.
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    projection: Option<HashSet<String>>,
    has_header: bool,
    primary_key_only: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeOptions {
    /// Reads every column of a record with a bitmap header.
    pub fn new() -> Self {
        Self {
            projection: None,
            has_header: true,
            primary_key_only: false,
        }
    }

    /// Options for primary-key bytes: no header, key columns only.
    pub fn key() -> Self {
        Self::new().without_header().primary_key_only()
    }

    /// Keeps only the named columns.
    pub fn project<S: AsRef<str>>(mut self, columns: &[S]) -> Self {
        self.projection = Some(columns.iter().map(|c| c.as_ref().to_string()).collect());
        self
    }

    /// The input has no bitmap header.
    pub fn without_header(mut self) -> Self {
        self.has_header = false;
        self
    }

    /// Stops at the first column outside the primary key.
    pub fn primary_key_only(mut self) -> Self {
        self.primary_key_only = true;
        self
    }

    /// Returns the projected column names.
    pub fn projection(&self) -> Option<&HashSet<String>> {
        self.projection.as_ref()
    }

    /// Returns true if the input starts with a bitmap header.
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Returns true if only primary-key columns are read.
    pub fn is_primary_key_only(&self) -> bool {
        self.primary_key_only
    }
}

/// Record decoder over one input buffer.
pub struct RecordDecoder<'a> {
    schema: &'a Schema,
    data: &'a [u8],
    offset: usize,
}

impl<'a> RecordDecoder<'a> {
    /// Creates a decoder for a record of `schema`.
    pub fn new(schema: &'a Schema, data: &'a [u8]) -> Self {
        Self {
            schema,
            data,
            offset: 0,
        }
    }

    /// Decodes the record into a row bound to the schema.
    pub fn decode(mut self, options: &DecodeOptions) -> Result<Row> {
        let schema = self.schema;
        let layout = schema.layout();
        let bitmap = if options.has_header {
            NullBitmap::from_bytes(self.read(layout.header_size())?)
        } else {
            NullBitmap::new(0)
        };

        let mut row = Row::new();
        let mut selected = 0;
        for (index, column) in schema.columns().iter().enumerate() {
            if let Some(projection) = &options.projection {
                if selected >= projection.len() {
                    break;
                }
            }
            if options.primary_key_only && !column.is_primary_key() {
                break;
            }

            let keep = options
                .projection
                .as_ref()
                .map_or(true, |p| p.contains(column.name()));
            if keep {
                selected += 1;
            }

            if options.has_header {
                if let Some(bit) = layout.null_bit(index) {
                    if bitmap.is_set(bit) {
                        continue;
                    }
                }
            }

            let len = if column.is_variable_length() {
                self.read_length()?
            } else {
                column.size()
            };
            let bytes = self.read(len)?;
            if keep {
                let field = Field::from_buffer(Arc::clone(column), RawBuffer::from(bytes));
                row.set_field_with(column.name(), field, Arc::clone(column));
            }
        }

        row.bind_schema(schema)?;
        tracing::trace!(
            consumed = self.offset,
            len = self.data.len(),
            fields = row.len(),
            "record decoded"
        );
        Ok(row)
    }

    fn read(&mut self, len: usize) -> Result<&'a [u8]> {
        let data = self.data;
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= data.len())
            .ok_or_else(|| Error::truncated(self.offset, len, data.len() - self.offset))?;
        let bytes = &data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    fn read_length(&mut self) -> Result<usize> {
        let mut prefix = [0u8; 4];
        prefix[..LENGTH_PREFIX_SIZE].copy_from_slice(self.read(LENGTH_PREFIX_SIZE)?);
        Ok(u32::from_le_bytes(prefix) as usize)
    }
}
