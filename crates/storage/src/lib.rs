//! protodb Storage - Record keys, record stores and tables for protodb.
//!
//! This crate provides the storage layer including:
//!
//! - `RecordKey`: Ordered primary-key of a stored record, with prefix matching
//! - `RecordStore`: Byte-sequence store addressed by record keys
//! - `MemoryStore`: Ordered in-memory record store
//! - `Table`: Schema, codec and store wired together
//! - `ComparisonOp`: Single-column predicates for filtering
//!
//! # Example
//!
//! ```rust
//! use protodb_storage::{ComparisonOp, Table};
//! use protodb_core::schema::{ColumnDescriptor, Schema};
//! use protodb_core::{DataType, Field, Row};
//!
//! // Create a table
//! let schema = Schema::builder()
//!     .add_column(ColumnDescriptor::new("id", DataType::Long).primary_key(true))
//!     .add_column(ColumnDescriptor::string("name", 64))
//!     .build()
//!     .unwrap();
//! let mut table = Table::in_memory("users", schema);
//!
//! // Add a record
//! let mut row = Row::new();
//! row.set_long("id", 1);
//! row.set_string("name", "Alice");
//! assert!(table.add_record(&row).unwrap());
//!
//! let found = table
//!     .filter_records("name", &Field::string("Alice"), ComparisonOp::Equal)
//!     .unwrap();
//! assert_eq!(found.len(), 1);
//! ```

#![no_std]

extern crate alloc;

pub mod key;
pub mod predicate;
pub mod store;
pub mod table;

pub use key::RecordKey;
pub use predicate::ComparisonOp;
pub use store::{MemoryStore, RecordStore};
pub use table::Table;
