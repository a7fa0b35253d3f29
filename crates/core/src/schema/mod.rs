//! Schema module for protodb.
//!
//! This module contains the column descriptor, the validated schema with its
//! canonical column order, and the record layout derived from it.

mod column;
mod layout;
mod prototype;

pub use column::ColumnDescriptor;
pub use layout::RecordLayout;
pub use prototype::{Schema, SchemaBuilder};
