//! Column descriptor for protodb schemas.

use crate::types::DataType;
use alloc::string::String;

/// Layout metadata for one schema column.
#[derive(Clone, Debug)]
pub struct ColumnDescriptor {
    /// Column name.
    name: String,
    /// Data type of the column.
    data_type: DataType,
    /// Fixed width in bytes, or the maximum width if variable-length.
    size: u16,
    /// Whether this column allows absent values.
    nullable: bool,
    /// Whether this column is part of the primary key.
    primary_key: bool,
    /// Whether values are stored with a length prefix.
    variable_length: bool,
}

impl ColumnDescriptor {
    /// Creates a new column descriptor.
    ///
    /// Numeric and boolean columns take their width from the type. String
    /// and binary columns start variable-length with size 0; set a bound with
    /// [`max_size`](Self::max_size) or [`fixed_size`](Self::fixed_size).
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            size: data_type.fixed_width().unwrap_or(0),
            nullable: false,
            primary_key: false,
            variable_length: data_type.is_variable_by_default(),
        }
    }

    /// Creates a variable-length string column bounded by `max_size` bytes.
    pub fn string(name: impl Into<String>, max_size: u16) -> Self {
        Self::new(name, DataType::String).max_size(max_size)
    }

    /// Creates a variable-length binary column bounded by `max_size` bytes.
    pub fn binary(name: impl Into<String>, max_size: u16) -> Self {
        Self::new(name, DataType::Binary).max_size(max_size)
    }

    /// Descriptor for fields built directly from native values.
    pub(crate) fn generic(data_type: DataType, size: usize) -> Self {
        Self {
            name: String::new(),
            data_type,
            size: u16::try_from(size).unwrap_or(u16::MAX),
            nullable: true,
            primary_key: false,
            variable_length: data_type.is_variable_by_default(),
        }
    }

    /// Sets whether this column is nullable.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets whether this column is part of the primary key.
    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    /// Stores values with a length prefix, at most `max_size` bytes long.
    pub fn max_size(mut self, max_size: u16) -> Self {
        self.size = max_size;
        self.variable_length = true;
        self
    }

    /// Stores values zero-padded to exactly `size` bytes.
    pub fn fixed_size(mut self, size: u16) -> Self {
        self.size = size;
        self.variable_length = false;
        self
    }

    /// Returns the column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the data type.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the fixed width, or the maximum width of a variable-length column.
    #[inline]
    pub fn size(&self) -> usize {
        usize::from(self.size)
    }

    /// Returns whether this column is nullable.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns whether this column is part of the primary key.
    #[inline]
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Returns whether this column is variable-length.
    #[inline]
    pub fn is_variable_length(&self) -> bool {
        self.variable_length
    }

    /// Returns true for descriptors that do not belong to a schema.
    #[inline]
    pub fn is_generic(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns true if `name` refers to this column, ignoring case.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl PartialEq for ColumnDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.matches_name(&other.name)
    }
}

impl Eq for ColumnDescriptor {}
