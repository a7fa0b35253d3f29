//! Layout constants shared by the schema and the binary codec.

/// Longest column name accepted by schema validation, in characters.
pub const MAX_COLUMN_NAME_LEN: usize = 240;

/// Width of the little-endian length prefix written before variable-length values.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Bit of header byte 0 that marks a record as present.
pub const ROW_PRESENT_BIT: usize = 0;
