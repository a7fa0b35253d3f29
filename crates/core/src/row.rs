//! Row structure for protodb.
//!
//! A [`Row`] maps column names to typed fields. Values can be inserted
//! before the row knows its schema; they are parked untyped and resolved
//! when [`Row::bind_schema`] is called.

use crate::error::Result;
use crate::field::Field;
use crate::schema::{ColumnDescriptor, Schema};
use crate::value::Value;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp::Ordering;
use core::fmt;
use hashbrown::HashMap;

/// Content of one column slot.
#[derive(Clone, Debug)]
enum Slot {
    /// A typed field.
    Bound(Field),
    /// A native value waiting for a schema to give it a type.
    Unbound(Value),
}

/// A row of named fields.
#[derive(Clone, Debug, Default)]
pub struct Row {
    /// Column slots, ordered by name.
    slots: BTreeMap<String, Slot>,
    /// Schema columns the bound fields were attached to.
    metadata: HashMap<String, Arc<ColumnDescriptor>>,
    schema: Option<Schema>,
    /// Sum of the bound fields' buffer lengths.
    byte_size: usize,
    /// Maximum record size of the bound schema.
    logical_len: usize,
    /// Set once the row passed schema validation; cleared by every mutation.
    valid: Cell<bool>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a field, replacing any previous value of the column. The
    /// column loses its schema metadata until the next bind.
    pub fn set_field(&mut self, column: impl Into<String>, field: Field) {
        let column = column.into();
        self.valid.set(false);
        self.metadata.remove(&column);
        self.byte_size += field.byte_len();
        if let Some(Slot::Bound(old)) = self.slots.insert(column, Slot::Bound(field)) {
            self.byte_size -= old.byte_len();
        }
    }

    /// Stores a field together with the column it belongs to.
    pub fn set_field_with(
        &mut self,
        column: impl Into<String>,
        field: Field,
        descriptor: Arc<ColumnDescriptor>,
    ) {
        let column = column.into();
        self.set_field(column.clone(), field);
        self.metadata.insert(column, descriptor);
    }

    /// Sets an INTEGER value.
    pub fn set_int(&mut self, column: impl Into<String>, value: i32) {
        self.set_field(column, Field::integer(value));
    }

    /// Sets a LONG value.
    pub fn set_long(&mut self, column: impl Into<String>, value: i64) {
        self.set_field(column, Field::long(value));
    }

    /// Sets a FLOAT value.
    pub fn set_float(&mut self, column: impl Into<String>, value: f32) {
        self.set_field(column, Field::float(value));
    }

    /// Sets a DOUBLE value.
    pub fn set_double(&mut self, column: impl Into<String>, value: f64) {
        self.set_field(column, Field::double(value));
    }

    /// Sets a STRING value.
    pub fn set_string(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.set_field(column, Field::string(value));
    }

    /// Sets a BOOLEAN value.
    pub fn set_boolean(&mut self, column: impl Into<String>, value: bool) {
        self.set_field(column, Field::boolean(value));
    }

    /// Sets a BINARY value.
    pub fn set_binary(&mut self, column: impl Into<String>, value: Vec<u8>) {
        self.set_field(column, Field::binary(value));
    }

    /// Marks a column as explicitly NULL.
    pub fn set_null(&mut self, column: impl Into<String>) {
        self.set_field(column, Field::null());
    }

    /// Sets a value whose column type may not be known yet.
    ///
    /// With a bound schema that has the column, the value is typed right
    /// away and must match the column type. Otherwise it is kept untyped
    /// until [`bind_schema`](Self::bind_schema).
    pub fn set_value(&mut self, column: impl Into<String>, value: Value) -> Result<()> {
        let column = column.into();
        let descriptor = self
            .schema
            .as_ref()
            .and_then(|s| s.column(&column))
            .cloned();

        match descriptor {
            Some(descriptor) => {
                let field = Field::typed(value, Arc::clone(&descriptor))?;
                self.set_field_with(column, field, descriptor);
            }
            None => {
                self.valid.set(false);
                self.metadata.remove(&column);
                if let Some(Slot::Bound(old)) = self.slots.insert(column, Slot::Unbound(value)) {
                    self.byte_size -= old.byte_len();
                }
            }
        }
        Ok(())
    }

    /// Removes a column, returning its field if it had one.
    pub fn unset(&mut self, column: &str) -> Option<Field> {
        self.valid.set(false);
        self.metadata.remove(column);
        match self.slots.remove(column)? {
            Slot::Bound(field) => {
                self.byte_size -= field.byte_len();
                Some(field)
            }
            Slot::Unbound(_) => None,
        }
    }

    /// Binds the row to a schema.
    ///
    /// Untyped values of schema columns are typed by the column type and
    /// fields without schema metadata are attached to their column. A value
    /// whose type differs from its column fails the whole bind and leaves
    /// the row unchanged.
    pub fn bind_schema(&mut self, schema: &Schema) -> Result<()> {
        let mut resolved = Vec::new();
        for (name, slot) in &self.slots {
            let Some(column) = schema.column(name) else {
                continue;
            };
            match slot {
                Slot::Unbound(value) => {
                    let field = Field::typed(value.clone(), Arc::clone(column))?;
                    resolved.push((name.clone(), field, Arc::clone(column)));
                }
                Slot::Bound(field) if !self.metadata.contains_key(name) => {
                    let field = field.with_column(Arc::clone(column))?;
                    resolved.push((name.clone(), field, Arc::clone(column)));
                }
                Slot::Bound(_) => {}
            }
        }

        for (name, field, column) in resolved {
            self.set_field_with(name, field, column);
        }
        self.logical_len = schema.layout().max_record_size();
        self.schema = Some(schema.clone());
        self.valid.set(false);
        Ok(())
    }

    /// Returns the bound schema.
    #[inline]
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Returns the typed field of a column.
    pub fn field(&self, column: &str) -> Option<&Field> {
        match self.slots.get(column)? {
            Slot::Bound(field) => Some(field),
            Slot::Unbound(_) => None,
        }
    }

    /// Returns a value still waiting for a schema.
    pub fn unbound_value(&self, column: &str) -> Option<&Value> {
        match self.slots.get(column)? {
            Slot::Unbound(value) => Some(value),
            Slot::Bound(_) => None,
        }
    }

    /// Returns true if the column has a typed field.
    pub fn contains_column(&self, column: &str) -> bool {
        self.field(column).is_some()
    }

    /// Returns the schema column a field was attached to.
    pub fn column_metadata(&self, column: &str) -> Option<&Arc<ColumnDescriptor>> {
        self.metadata.get(column)
    }

    /// Returns the raw bytes of a non-null field.
    pub fn get_data(&self, column: &str) -> Option<&[u8]> {
        self.field(column)
            .filter(|f| !f.is_null())
            .map(|f| f.buffer().as_bytes())
    }

    fn read<'a, T>(
        &'a self,
        column: &str,
        read: impl FnOnce(&'a Field) -> Result<T>,
    ) -> Result<Option<T>> {
        match self.field(column) {
            Some(field) if !field.is_null() => read(field).map(Some),
            _ => Ok(None),
        }
    }

    /// Gets an INTEGER value.
    pub fn get_int(&self, column: &str) -> Result<Option<i32>> {
        self.read(column, Field::as_i32)
    }

    /// Gets a LONG value.
    pub fn get_long(&self, column: &str) -> Result<Option<i64>> {
        self.read(column, Field::as_i64)
    }

    /// Gets a FLOAT value.
    pub fn get_float(&self, column: &str) -> Result<Option<f32>> {
        self.read(column, Field::as_f32)
    }

    /// Gets a DOUBLE value.
    pub fn get_double(&self, column: &str) -> Result<Option<f64>> {
        self.read(column, Field::as_f64)
    }

    /// Gets a STRING value.
    pub fn get_string(&self, column: &str) -> Result<Option<&str>> {
        self.read(column, Field::as_str)
    }

    /// Gets a BOOLEAN value.
    pub fn get_boolean(&self, column: &str) -> Result<Option<bool>> {
        self.read(column, Field::as_bool)
    }

    /// Gets a BINARY value.
    pub fn get_binary(&self, column: &str) -> Result<Option<&[u8]>> {
        self.read(column, Field::as_bytes)
    }

    /// Gets the native value of a column.
    pub fn get_value(&self, column: &str) -> Option<&Value> {
        self.field(column).map(Field::value)
    }

    /// Renders the value of a column as text, whatever its type.
    pub fn get_as_string(&self, column: &str) -> Option<String> {
        self.field(column).map(Field::to_text)
    }

    /// Iterates over the typed fields in column-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.slots.iter().filter_map(|(name, slot)| match slot {
            Slot::Bound(field) => Some((name.as_str(), field)),
            Slot::Unbound(_) => None,
        })
    }

    /// Returns the number of typed fields.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if the row has no typed fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sum of the fields' buffer lengths.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    /// Returns the maximum record size of the bound schema, 0 when unbound.
    #[inline]
    pub fn logical_len(&self) -> usize {
        self.logical_len
    }

    #[inline]
    pub(crate) fn is_validated(&self) -> bool {
        self.valid.get()
    }

    #[inline]
    pub(crate) fn mark_validated(&self) {
        self.valid.set(true);
    }

    /// Orders two rows field by field.
    ///
    /// Fields of this row are visited in column-name order; columns the
    /// other row lacks are skipped. The first unequal field decides, ties
    /// go to the row with fewer fields.
    pub fn compare_to(&self, other: &Row) -> Ordering {
        self.partial_match(other).then_with(|| self.len().cmp(&other.len()))
    }

    /// Like [`compare_to`](Self::compare_to) without the field-count tie-break.
    pub fn partial_match(&self, other: &Row) -> Ordering {
        self.iter()
            .filter_map(|(name, field)| other.field(name).map(|o| field.sort_cmp(o)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("row(")?;
        for (i, (name, field)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, field.value())?;
        }
        f.write_str(")")
    }
}
