//! Typed fields.
//!
//! A [`Field`] is one cell of a row: raw bytes plus the column descriptor
//! they were read or written under. The native [`Value`] is decoded from the
//! bytes on first access and cached for the lifetime of the field.
//!
//! The variant of a field is its [`DataType`] tag, drawn from the closed set
//! INTEGER, LONG, FLOAT, DOUBLE, STRING, BOOLEAN, BINARY and NULL. Fields of
//! different variants compare according to the rules in [`compare`].

mod compare;

pub use compare::FieldOrdering;

use crate::buffer::RawBuffer;
use crate::error::{Error, Result};
use crate::schema::ColumnDescriptor;
use crate::types::DataType;
use crate::value::Value;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use once_cell::race::OnceBox;

/// A typed cell value backed by raw bytes.
pub struct Field {
    column: Arc<ColumnDescriptor>,
    data_type: DataType,
    buffer: RawBuffer,
    cached: OnceBox<Value>,
}

impl Field {
    /// Creates a field from stored bytes, typed by the column.
    pub fn from_buffer(column: Arc<ColumnDescriptor>, buffer: RawBuffer) -> Self {
        Self {
            data_type: column.data_type(),
            column,
            buffer,
            cached: OnceBox::new(),
        }
    }

    /// Creates a field from a native value under a generic descriptor.
    pub fn from_value(value: Value) -> Self {
        let bytes = value.to_bytes();
        let column = Arc::new(ColumnDescriptor::generic(value.data_type(), bytes.len()));
        Self::with_cached(column, value.data_type(), RawBuffer::new(bytes), value)
    }

    /// Creates a field from a native value under a schema column.
    ///
    /// The value must have the column's type; `Value::Null` is accepted for
    /// any column and produces a NULL field.
    pub fn typed(value: Value, column: Arc<ColumnDescriptor>) -> Result<Self> {
        let data_type = value.data_type();
        if data_type != DataType::Null && data_type != column.data_type() {
            return Err(Error::type_mismatch(column.data_type(), data_type));
        }
        let bytes = value.to_bytes();
        Ok(Self::with_cached(column, data_type, RawBuffer::new(bytes), value))
    }

    fn with_cached(
        column: Arc<ColumnDescriptor>,
        data_type: DataType,
        buffer: RawBuffer,
        value: Value,
    ) -> Self {
        let cached = OnceBox::new();
        let _ = cached.set(Box::new(value));
        Self {
            column,
            data_type,
            buffer,
            cached,
        }
    }

    /// Creates an INTEGER field.
    pub fn integer(v: i32) -> Self {
        Self::from_value(Value::Integer(v))
    }

    /// Creates a LONG field.
    pub fn long(v: i64) -> Self {
        Self::from_value(Value::Long(v))
    }

    /// Creates a FLOAT field.
    pub fn float(v: f32) -> Self {
        Self::from_value(Value::Float(v))
    }

    /// Creates a DOUBLE field.
    pub fn double(v: f64) -> Self {
        Self::from_value(Value::Double(v))
    }

    /// Creates a STRING field.
    pub fn string(v: impl Into<String>) -> Self {
        Self::from_value(Value::String(v.into()))
    }

    /// Creates a BOOLEAN field.
    pub fn boolean(v: bool) -> Self {
        Self::from_value(Value::Boolean(v))
    }

    /// Creates a BINARY field.
    pub fn binary(v: Vec<u8>) -> Self {
        Self::from_value(Value::Binary(v))
    }

    /// Creates a NULL field.
    pub fn null() -> Self {
        Self::from_value(Value::Null)
    }

    /// Rebinds this field to a schema column of the same type.
    pub fn with_column(&self, column: Arc<ColumnDescriptor>) -> Result<Self> {
        if self.data_type != DataType::Null && self.data_type != column.data_type() {
            return Err(Error::type_mismatch(column.data_type(), self.data_type));
        }
        let field = Self {
            column,
            data_type: self.data_type,
            buffer: self.buffer.clone(),
            cached: OnceBox::new(),
        };
        let trims = field.data_type == DataType::String && !field.column.is_variable_length();
        if let Some(value) = self.cached.get().filter(|_| !trims) {
            let _ = field.cached.set(Box::new(value.clone()));
        }
        Ok(field)
    }

    /// Returns the variant tag.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the column descriptor this field was built under.
    #[inline]
    pub fn column(&self) -> &Arc<ColumnDescriptor> {
        &self.column
    }

    /// Returns the raw bytes.
    #[inline]
    pub fn buffer(&self) -> &RawBuffer {
        &self.buffer
    }

    /// Returns the length of the raw bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true for NULL fields.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.data_type == DataType::Null
    }

    /// Returns the native value, decoding it on first access.
    ///
    /// Strings of fixed-width columns drop their zero padding.
    pub fn value(&self) -> &Value {
        self.cached.get_or_init(|| {
            let value = if self.column.is_variable_length() {
                Value::from_bytes(self.data_type, &self.buffer)
            } else {
                Value::from_padded_bytes(self.data_type, &self.buffer)
            };
            Box::new(value)
        })
    }

    /// Returns the value of an INTEGER field.
    pub fn as_i32(&self) -> Result<i32> {
        self.value()
            .as_i32()
            .ok_or_else(|| Error::type_mismatch(DataType::Integer, self.data_type))
    }

    /// Returns the value of a LONG field.
    pub fn as_i64(&self) -> Result<i64> {
        self.value()
            .as_i64()
            .ok_or_else(|| Error::type_mismatch(DataType::Long, self.data_type))
    }

    /// Returns the value of a FLOAT field.
    pub fn as_f32(&self) -> Result<f32> {
        self.value()
            .as_f32()
            .ok_or_else(|| Error::type_mismatch(DataType::Float, self.data_type))
    }

    /// Returns the value of a DOUBLE field.
    pub fn as_f64(&self) -> Result<f64> {
        self.value()
            .as_f64()
            .ok_or_else(|| Error::type_mismatch(DataType::Double, self.data_type))
    }

    /// Returns the value of a STRING field.
    pub fn as_str(&self) -> Result<&str> {
        self.value()
            .as_str()
            .ok_or_else(|| Error::type_mismatch(DataType::String, self.data_type))
    }

    /// Returns the value of a BOOLEAN field.
    pub fn as_bool(&self) -> Result<bool> {
        self.value()
            .as_bool()
            .ok_or_else(|| Error::type_mismatch(DataType::Boolean, self.data_type))
    }

    /// Returns the value of a BINARY field.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        self.value()
            .as_bytes()
            .ok_or_else(|| Error::type_mismatch(DataType::Binary, self.data_type))
    }

    /// Renders the value as text.
    pub fn to_text(&self) -> String {
        self.value().to_string()
    }
}

impl Clone for Field {
    fn clone(&self) -> Self {
        let cached = OnceBox::new();
        if let Some(value) = self.cached.get() {
            let _ = cached.set(Box::new(value.clone()));
        }
        Self {
            column: Arc::clone(&self.column),
            data_type: self.data_type,
            buffer: self.buffer.clone(),
            cached,
        }
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.data_type == other.data_type && self.value() == other.value()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("data_type", &self.data_type)
            .field("column", &self.column.name())
            .field("value", self.value())
            .finish()
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Field::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_native_constructors() {
        assert_eq!(Field::integer(7).as_i32().unwrap(), 7);
        assert_eq!(Field::long(-7).as_i64().unwrap(), -7);
        assert_eq!(Field::float(1.5).as_f32().unwrap(), 1.5);
        assert_eq!(Field::double(2.5).as_f64().unwrap(), 2.5);
        assert_eq!(Field::string("abc").as_str().unwrap(), "abc");
        assert!(Field::boolean(true).as_bool().unwrap());
        assert_eq!(Field::binary(vec![9, 8]).as_bytes().unwrap(), &[9, 8]);
        assert!(Field::null().is_null());
    }

    #[test]
    fn test_only_fixed_width_strings_are_trimmed() {
        let fixed = Arc::new(ColumnDescriptor::string("code", 4).fixed_size(4));
        let field = Field::from_buffer(fixed, RawBuffer::new(vec![b'a', 0, 0, 0]));
        assert_eq!(field.as_str().unwrap(), "a");

        let varlen = Arc::new(ColumnDescriptor::string("note", 4));
        let field = Field::from_buffer(varlen, RawBuffer::new(vec![b'a', 0]));
        assert_eq!(field.as_str().unwrap(), "a\0");
    }

    #[test]
    fn test_wrong_accessor_is_a_type_error() {
        let field = Field::string("abc");
        assert_eq!(
            field.as_i64(),
            Err(Error::type_mismatch(DataType::Long, DataType::String))
        );
    }

    #[test]
    fn test_lazy_materialization_from_buffer() {
        let column = Arc::new(ColumnDescriptor::new("n", DataType::Integer));
        let field = Field::from_buffer(column, RawBuffer::new(vec![42, 0, 0, 0]));
        assert!(field.cached.get().is_none());
        assert_eq!(field.as_i32().unwrap(), 42);
        assert!(field.cached.get().is_some());
        assert_eq!(field.byte_len(), 4);
    }

    #[test]
    fn test_typed_rejects_mismatch() {
        let column = Arc::new(ColumnDescriptor::new("n", DataType::Long));
        assert!(Field::typed(Value::Long(1), Arc::clone(&column)).is_ok());
        assert!(Field::typed(Value::Null, Arc::clone(&column)).unwrap().is_null());
        assert_eq!(
            Field::typed(Value::Integer(1), column).unwrap_err(),
            Error::type_mismatch(DataType::Long, DataType::Integer)
        );
    }

    #[test]
    fn test_with_column_keeps_value() {
        let column = Arc::new(ColumnDescriptor::string("name", 20));
        let field = Field::string("ann").with_column(Arc::clone(&column)).unwrap();
        assert_eq!(field.column().name(), "name");
        assert_eq!(field.as_str().unwrap(), "ann");
        assert!(Field::integer(1).with_column(column).is_err());
    }

    #[test]
    fn test_clone_and_eq() {
        let a = Field::double(0.25);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, Field::float(0.25));
    }
}
