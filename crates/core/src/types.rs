//! Data type tags for columns and fields.

use core::fmt;

/// Type tag of a column or field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    /// 32-bit floating point number
    Float,
    /// 64-bit floating point number
    Double,
    /// UTF-8 string
    String,
    /// Boolean stored as a single byte
    Boolean,
    /// Opaque byte run
    Binary,
    /// Absent value, no payload
    Null,
}

impl DataType {
    /// Returns the fixed width in bytes, or None for types whose width is
    /// chosen per column.
    pub fn fixed_width(self) -> Option<u16> {
        match self {
            DataType::Integer | DataType::Float => Some(4),
            DataType::Long | DataType::Double => Some(8),
            DataType::Boolean => Some(1),
            DataType::Null => Some(0),
            DataType::String | DataType::Binary => None,
        }
    }

    /// Returns whether values of this type are numbers.
    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            DataType::Integer | DataType::Long | DataType::Float | DataType::Double
        )
    }

    /// Returns whether columns of this type default to variable-length storage.
    #[inline]
    pub fn is_variable_by_default(self) -> bool {
        matches!(self, DataType::String | DataType::Binary)
    }

    /// Rank used to order values whose types are not comparable.
    pub(crate) fn category_rank(self) -> u8 {
        match self {
            DataType::Null => 0,
            DataType::Boolean => 1,
            DataType::Integer | DataType::Long | DataType::Float | DataType::Double => 2,
            DataType::String => 3,
            DataType::Binary => 4,
        }
    }

    /// Upper-case name of the type tag.
    pub fn name(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Long => "LONG",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
            DataType::String => "STRING",
            DataType::Boolean => "BOOLEAN",
            DataType::Binary => "BINARY",
            DataType::Null => "NULL",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
