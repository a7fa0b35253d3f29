//! Error types for the protodb record layer.

use crate::types::DataType;
use alloc::string::String;
use alloc::vec::Vec;

/// Result type alias for protodb operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for schema definition, row encoding and field access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The schema failed validation. Every violated rule is listed.
    #[error("invalid schema: {}", .violations.join("; "))]
    InvalidSchema { violations: Vec<String> },

    /// A non-nullable column has no value.
    #[error("column {column} cannot be null")]
    NullConstraint { column: String },

    /// A value is larger than its column allows.
    #[error("value for column {column} is {len} bytes, limit is {limit}")]
    ValueTooLarge {
        column: String,
        len: usize,
        limit: usize,
    },

    /// A field or native value does not have the requested type.
    #[error("type mismatch: expected {expected:?}, got {got:?}")]
    TypeMismatch { expected: DataType, got: DataType },

    /// A column is not part of the schema.
    #[error("column {column} not found")]
    ColumnNotFound { column: String },

    /// The encoded record ended before the layout was fully consumed.
    #[error("record truncated: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

impl Error {
    /// Creates an invalid schema error from the collected violations.
    pub fn invalid_schema(violations: Vec<String>) -> Self {
        Error::InvalidSchema { violations }
    }

    /// Creates a null constraint error.
    pub fn null_constraint(column: impl Into<String>) -> Self {
        Error::NullConstraint {
            column: column.into(),
        }
    }

    /// Creates a value-too-large error.
    pub fn value_too_large(column: impl Into<String>, len: usize, limit: usize) -> Self {
        Error::ValueTooLarge {
            column: column.into(),
            len,
            limit,
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: DataType, got: DataType) -> Self {
        Error::TypeMismatch { expected, got }
    }

    /// Creates a column not found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Error::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Creates a truncated record error.
    pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        Error::Truncated {
            offset,
            needed,
            available,
        }
    }

    /// Returns true for errors raised while validating row data.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::NullConstraint { .. } | Error::ValueTooLarge { .. } | Error::Truncated { .. }
        )
    }
}
