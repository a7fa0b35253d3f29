//! Native value definitions.
//!
//! `Value` is the language-native form of a cell: it is what callers pass to
//! the write path and what a [`Field`](crate::Field) materializes from its
//! raw bytes on first access.

use crate::types::DataType;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// A native value that can be stored in a row.
#[derive(Clone, Debug)]
pub enum Value {
    /// Null value
    Null,
    /// 32-bit signed integer
    Integer(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// UTF-8 string
    String(String),
    /// Boolean value
    Boolean(bool),
    /// Binary data
    Binary(Vec<u8>),
}

impl Value {
    /// Returns the type tag of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::Null,
            Value::Integer(_) => DataType::Integer,
            Value::Long(_) => DataType::Long,
            Value::Float(_) => DataType::Float,
            Value::Double(_) => DataType::Double,
            Value::String(_) => DataType::String,
            Value::Boolean(_) => DataType::Boolean,
            Value::Binary(_) => DataType::Binary,
        }
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the i32 value if this is an Integer, None otherwise.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the i64 value if this is a Long, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the f32 value if this is a Float, None otherwise.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the f64 value if this is a Double, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a Boolean, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a reference to the bytes if this is Binary, None otherwise.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Encodes this value into its storage bytes.
    ///
    /// Numbers are little-endian, booleans one byte, strings UTF-8 and
    /// Null has no payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Null => Vec::new(),
            Value::Integer(v) => v.to_le_bytes().to_vec(),
            Value::Long(v) => v.to_le_bytes().to_vec(),
            Value::Float(v) => v.to_le_bytes().to_vec(),
            Value::Double(v) => v.to_le_bytes().to_vec(),
            Value::String(v) => v.as_bytes().to_vec(),
            Value::Boolean(v) => alloc::vec![u8::from(*v)],
            Value::Binary(v) => v.clone(),
        }
    }

    /// Decodes storage bytes as a value of the given type.
    ///
    /// Numeric buffers shorter than the type width are zero-extended. Strings
    /// keep every byte, trailing zeros included.
    pub fn from_bytes(data_type: DataType, bytes: &[u8]) -> Value {
        match data_type {
            DataType::Null => Value::Null,
            DataType::Integer => Value::Integer(i32::from_le_bytes(widen(bytes))),
            DataType::Long => Value::Long(i64::from_le_bytes(widen(bytes))),
            DataType::Float => Value::Float(f32::from_le_bytes(widen(bytes))),
            DataType::Double => Value::Double(f64::from_le_bytes(widen(bytes))),
            DataType::Boolean => Value::Boolean(bytes.first().is_some_and(|b| *b != 0)),
            DataType::String => Value::String(String::from_utf8_lossy(bytes).into_owned()),
            DataType::Binary => Value::Binary(bytes.to_vec()),
        }
    }

    /// Decodes the bytes of a fixed-width column. String values lose their
    /// right zero padding; binary values keep it.
    pub fn from_padded_bytes(data_type: DataType, bytes: &[u8]) -> Value {
        match data_type {
            DataType::String => {
                let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |p| p + 1);
                Value::from_bytes(data_type, &bytes[..end])
            }
            _ => Value::from_bytes(data_type, bytes),
        }
    }
}

fn widen<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let len = bytes.len().min(N);
    out[..len].copy_from_slice(&bytes[..len]);
    out
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::Double(a), Value::Double(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Binary(a), Value::Binary(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::String(v) => f.write_str(v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Binary(v) => {
                f.write_str("0x")?;
                for b in v {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
