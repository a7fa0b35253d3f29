//! Record keys.
//!
//! A [`RecordKey`] holds the typed primary-key fields of a record in
//! canonical order together with their primary-key bytes. Keys order field
//! by field, and a key that is a strict prefix of another sorts first, so
//! every key extending a given prefix forms one contiguous run.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use protodb_binary::RecordCodec;
use protodb_core::{Error, Field, Result, Row, Schema};

/// Ordered key of a stored record, or a prefix of one.
#[derive(Clone, Debug)]
pub struct RecordKey {
    fields: Vec<Field>,
    bytes: Vec<u8>,
}

impl RecordKey {
    /// Builds a key from the leading run of primary-key columns present in
    /// `row`. A row holding every key column yields a full key; fewer
    /// columns yield a prefix.
    pub fn from_row(schema: &Schema, row: &Row) -> Result<Self> {
        let mut fields = Vec::new();
        let mut bytes = Vec::with_capacity(schema.layout().primary_key_size());
        for column in schema.primary_key_columns() {
            let Some(field) = row.field(column.name()).filter(|f| !f.is_null()) else {
                break;
            };
            let field = field.with_column(Arc::clone(column))?;
            if field.byte_len() > column.size() {
                return Err(Error::value_too_large(column.name(), field.byte_len(), column.size()));
            }
            bytes.extend_from_slice(field.buffer());
            bytes.resize(bytes.len() + column.size() - field.byte_len(), 0);
            fields.push(field);
        }
        Ok(Self { fields, bytes })
    }

    /// Rebuilds a key from primary-key bytes.
    pub fn from_bytes(schema: &Schema, bytes: &[u8]) -> Result<Self> {
        let row = schema.decode_key(bytes)?;
        let fields = schema
            .primary_key_columns()
            .iter()
            .filter_map(|c| row.field(c.name()).cloned())
            .collect();
        Ok(Self {
            fields,
            bytes: bytes.to_vec(),
        })
    }

    /// Returns the key fields in canonical order.
    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the primary-key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of key fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true for the empty prefix, which every key starts with.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if this key covers every primary-key column of `schema`.
    pub fn is_complete(&self, schema: &Schema) -> bool {
        self.fields.len() == schema.layout().primary_key_count()
    }

    /// Returns true if `prefix` matches the leading fields of this key.
    pub fn starts_with(&self, prefix: &RecordKey) -> bool {
        prefix.len() <= self.len()
            && self
                .fields
                .iter()
                .zip(&prefix.fields)
                .all(|(a, b)| a.sort_cmp(b).is_eq())
    }
}

impl Ord for RecordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fields
            .iter()
            .zip(&other.fields)
            .map(|(a, b)| a.sort_cmp(b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| self.fields.len().cmp(&other.fields.len()))
    }
}

impl PartialOrd for RecordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RecordKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for RecordKey {}

#[cfg(test)]
mod tests {
    use super::*;
    use protodb_core::{ColumnDescriptor, DataType};

    fn schema() -> Schema {
        Schema::builder()
            .add_column(ColumnDescriptor::new("a", DataType::Integer).primary_key(true))
            .add_column(ColumnDescriptor::new("b", DataType::Long).primary_key(true))
            .add_column(ColumnDescriptor::string("c", 10).nullable(true))
            .build()
            .unwrap()
    }

    fn key(a: Option<i32>, b: Option<i64>) -> RecordKey {
        let mut row = Row::new();
        if let Some(a) = a {
            row.set_int("a", a);
        }
        if let Some(b) = b {
            row.set_long("b", b);
        }
        RecordKey::from_row(&schema(), &row).unwrap()
    }

    #[test]
    fn test_full_key_bytes() {
        let schema = schema();
        let mut row = Row::new();
        row.set_int("a", 1);
        row.set_long("b", 2);
        row.set_string("c", "x");

        let key = RecordKey::from_row(&schema, &row).unwrap();
        assert!(key.is_complete(&schema));
        assert_eq!(key.as_bytes(), &schema.extract_primary_key_bytes(&row).unwrap()[..]);
        assert_eq!(RecordKey::from_bytes(&schema, key.as_bytes()).unwrap(), key);
    }

    #[test]
    fn test_prefix_stops_at_first_gap() {
        let schema = schema();
        let only_b = key(None, Some(2));
        assert!(only_b.is_empty());

        let only_a = key(Some(1), None);
        assert_eq!(only_a.len(), 1);
        assert!(!only_a.is_complete(&schema));
        assert_eq!(only_a.as_bytes(), &[1, 0, 0, 0]);
    }

    #[test]
    fn test_ordering() {
        assert!(key(Some(1), Some(5)) < key(Some(2), Some(0)));
        assert!(key(Some(1), Some(-1)) < key(Some(1), Some(0)));
        assert!(key(Some(1), None) < key(Some(1), Some(i64::MIN)));
        assert!(key(None, None) < key(Some(i32::MIN), None));
        assert_eq!(key(Some(3), Some(3)), key(Some(3), Some(3)));
    }

    #[test]
    fn test_starts_with() {
        let full = key(Some(1), Some(2));
        assert!(full.starts_with(&key(Some(1), None)));
        assert!(full.starts_with(&key(None, None)));
        assert!(full.starts_with(&full));
        assert!(!full.starts_with(&key(Some(2), None)));
        assert!(!key(Some(1), None).starts_with(&full));
    }

    #[test]
    fn test_key_type_must_match_column() {
        let mut row = Row::new();
        row.set_string("a", "1");
        assert!(RecordKey::from_row(&schema(), &row).is_err());
    }
}
