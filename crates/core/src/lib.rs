//! protodb Core - Schema, typed fields and rows for the protodb record layer.
//!
//! This crate provides the foundational types shared by the codec and the
//! storage crates:
//!
//! - `DataType`: The closed set of column types (Integer, Long, Float, Double,
//!   String, Boolean, Binary, Null)
//! - `Value`: Native values carried by fields
//! - `Field`: A typed cell backed by raw bytes, decoded lazily
//! - `Row`: Named fields, optionally bound to a schema
//! - `schema`: Column descriptors, validated schemas and record layouts
//! - `Error`: Error types for schema and record operations
//!
//! # Example
//!
//! ```rust
//! use protodb_core::{DataType, Row};
//! use protodb_core::schema::{ColumnDescriptor, Schema};
//!
//! // Define a schema
//! let schema = Schema::builder()
//!     .add_column(ColumnDescriptor::new("id", DataType::Long).primary_key(true))
//!     .add_column(ColumnDescriptor::string("name", 64).nullable(true))
//!     .build()
//!     .unwrap();
//!
//! // Fill a row and check it against the schema
//! let mut row = Row::new();
//! row.set_long("id", 1);
//! row.set_string("name", "Alice");
//! row.bind_schema(&schema).unwrap();
//!
//! assert!(schema.validate_row(&row).is_ok());
//! assert_eq!(row.get_string("name").unwrap(), Some("Alice"));
//! ```

#![no_std]

extern crate alloc;

mod buffer;
mod error;
mod field;
pub mod limits;
mod row;
pub mod schema;
mod types;
mod value;

pub use buffer::RawBuffer;
pub use error::{Error, Result};
pub use field::{Field, FieldOrdering};
pub use row::Row;
pub use schema::{ColumnDescriptor, RecordLayout, Schema, SchemaBuilder};
pub use types::DataType;
pub use value::Value;
