//! Record encoder.
//!
//! Encodes rows into the record format described in the crate docs. The
//! encoder keeps one buffer sized for the schema's largest record and reuses
//! it across rows.

use super::NullBitmap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use protodb_core::limits::LENGTH_PREFIX_SIZE;
use protodb_core::{ColumnDescriptor, Error, Field, Result, Row, Schema};

/// Record encoder bound to one schema.
pub struct RecordEncoder<'a> {
    schema: &'a Schema,
    buffer: Vec<u8>,
}

impl<'a> RecordEncoder<'a> {
    /// Creates an encoder with a buffer pre-allocated for the largest record.
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            buffer: Vec::with_capacity(schema.layout().max_record_size()),
        }
    }

    /// Encodes a row and returns the record bytes.
    ///
    /// The row is checked against the schema first; on failure nothing is
    /// written.
    pub fn encode(&mut self, row: &Row) -> Result<&[u8]> {
        let schema = self.schema;
        schema.validate_row(row)?;
        self.buffer.clear();

        let layout = schema.layout();
        let mut bitmap = NullBitmap::new(layout.header_size());
        bitmap.mark_present();
        self.buffer.resize(layout.header_size(), 0);

        for (index, column) in schema.columns().iter().enumerate() {
            match present_field(row, column) {
                None => {
                    if let Some(bit) = layout.null_bit(index) {
                        bitmap.set(bit);
                    }
                }
                Some(field) if column.is_variable_length() => {
                    self.write_varlen(field.buffer());
                }
                Some(field) => {
                    self.write_padded(field.buffer(), column.size());
                }
            }
        }
        self.buffer[..layout.header_size()].copy_from_slice(bitmap.as_bytes());

        tracing::trace!(
            len = self.buffer.len(),
            max = layout.max_record_size(),
            "record encoded"
        );
        Ok(&self.buffer)
    }

    /// Encodes a row into a fresh vector.
    pub fn encode_to_vec(&mut self, row: &Row) -> Result<Vec<u8>> {
        self.encode(row).map(<[u8]>::to_vec)
    }

    /// Writes the primary-key columns of a row: their zero-padded bytes in
    /// canonical order, with no bitmap and no length prefixes.
    pub fn encode_primary_key(&mut self, row: &Row) -> Result<&[u8]> {
        let schema = self.schema;
        self.buffer.clear();
        for column in schema.primary_key_columns() {
            let field = present_field(row, column)
                .ok_or_else(|| Error::null_constraint(column.name()))?;
            if field.data_type() != column.data_type() {
                return Err(Error::type_mismatch(column.data_type(), field.data_type()));
            }
            if field.byte_len() > column.size() {
                return Err(Error::value_too_large(column.name(), field.byte_len(), column.size()));
            }
            self.write_padded(field.buffer(), column.size());
        }
        Ok(&self.buffer)
    }

    /// Returns the schema this encoder writes.
    pub fn schema(&self) -> &Schema {
        self.schema
    }

    #[inline]
    fn write_padded(&mut self, data: &[u8], width: usize) {
        self.buffer.extend_from_slice(data);
        self.buffer
            .resize(self.buffer.len() + width.saturating_sub(data.len()), 0);
    }

    #[inline]
    fn write_varlen(&mut self, data: &[u8]) {
        let len = data.len() as u32;
        self.buffer.extend_from_slice(&len.to_le_bytes()[..LENGTH_PREFIX_SIZE]);
        self.buffer.extend_from_slice(data);
    }
}

/// A NULL field counts as no value.
fn present_field<'r>(row: &'r Row, column: &Arc<ColumnDescriptor>) -> Option<&'r Field> {
    row.field(column.name()).filter(|f| !f.is_null())
}
