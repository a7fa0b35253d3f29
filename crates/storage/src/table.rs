//! Table facade.
//!
//! A [`Table`] ties a named schema to a record store: rows are bound to the
//! schema, encoded, and stored under their primary-key [`RecordKey`].

use crate::key::RecordKey;
use crate::predicate::ComparisonOp;
use crate::store::{MemoryStore, RecordStore};
use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Bound;
use protodb_binary::RecordCodec;
use protodb_core::{Error, Field, Result, Row, Schema};

/// A table of rows sharing one schema.
pub struct Table<S: RecordStore = MemoryStore> {
    name: String,
    schema: Schema,
    store: S,
}

impl Table<MemoryStore> {
    /// Creates a table over an empty in-memory store.
    pub fn in_memory(name: impl Into<String>, schema: Schema) -> Self {
        Self::new(name, schema, MemoryStore::new())
    }
}

impl<S: RecordStore> Table<S> {
    /// Creates a table over a record store.
    pub fn new(name: impl Into<String>, schema: Schema, store: S) -> Self {
        Self {
            name: name.into(),
            schema,
            store,
        }
    }

    /// Returns the table name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the table schema.
    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the underlying store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Stores a new record. Returns false if its key is already taken.
    pub fn add_record(&mut self, row: &Row) -> Result<bool> {
        let row = self.bind(row)?;
        let bytes = self.schema.encode(&row)?;
        let key = self.full_key(&row)?;
        let added = self.store.insert(key, bytes);
        if added {
            tracing::debug!(table = %self.name, records = self.store.len(), "record added");
        } else {
            tracing::debug!(table = %self.name, "duplicate key rejected");
        }
        Ok(added)
    }

    /// Replaces the record with the same key. Returns false if there is none.
    pub fn update_record(&mut self, row: &Row) -> Result<bool> {
        let row = self.bind(row)?;
        let bytes = self.schema.encode(&row)?;
        let key = self.full_key(&row)?;
        let updated = self.store.update(&key, bytes).is_some();
        tracing::debug!(table = %self.name, updated, "record update");
        Ok(updated)
    }

    /// Removes the record with the row's key and returns it.
    pub fn remove_record(&mut self, row: &Row) -> Result<Option<Row>> {
        let row = self.bind(row)?;
        let key = self.full_key(&row)?;
        match self.store.delete(&key) {
            Some(bytes) => {
                tracing::debug!(table = %self.name, records = self.store.len(), "record removed");
                self.schema.decode_row(&bytes).map(Some)
            }
            None => {
                tracing::trace!(table = %self.name, "remove missed");
                Ok(None)
            }
        }
    }

    /// Gets the record with the row's full primary key.
    pub fn get_record(&self, row: &Row) -> Result<Option<Row>> {
        let row = self.bind(row)?;
        let key = self.full_key(&row)?;
        match self.store.search(&key) {
            Some(bytes) => self.schema.decode_row(bytes).map(Some),
            None => {
                tracing::trace!(table = %self.name, "lookup missed");
                Ok(None)
            }
        }
    }

    /// Gets every record whose key starts with the primary-key columns the
    /// row holds. Only the leading run of key columns is used.
    pub fn get_records(&self, prefix: &Row) -> Result<Vec<Row>> {
        let key = self.prefix_key(prefix)?;
        self.decode_all(self.store.partial_search(&key))
    }

    /// Gets every record in key order.
    pub fn get_all_records(&self) -> Result<Vec<Row>> {
        self.decode_all(self.store.scan())
    }

    /// Gets the records with keys between two bounds, in key order. A bound
    /// row may hold a key prefix.
    pub fn range_records(&self, lower: Bound<&Row>, upper: Bound<&Row>) -> Result<Vec<Row>> {
        let lower = self.bound_key(lower)?;
        let upper = self.bound_key(upper)?;
        self.decode_all(self.store.range(lower.as_ref(), upper.as_ref()))
    }

    /// Gets every record whose `column` value satisfies `value <op> operand`.
    ///
    /// An absent value is NULL and never matches.
    pub fn filter_records(
        &self,
        column: &str,
        operand: &Field,
        op: ComparisonOp,
    ) -> Result<Vec<Row>> {
        if self.schema.column(column).is_none() {
            return Err(Error::column_not_found(column));
        }
        let null = Field::null();
        let mut rows = Vec::new();
        for bytes in self.store.scan() {
            let row = self.schema.decode_row(bytes)?;
            if op.evaluate(row.field(column).unwrap_or(&null), operand) {
                rows.push(row);
            }
        }
        tracing::trace!(table = %self.name, column, op = %op, matched = rows.len(), "filter");
        Ok(rows)
    }

    /// Returns the row bound to this table's schema, cloning it when it is
    /// bound elsewhere.
    fn bind<'r>(&self, row: &'r Row) -> Result<Cow<'r, Row>> {
        if row.schema().is_some_and(|s| s.same_as(&self.schema)) {
            return Ok(Cow::Borrowed(row));
        }
        let mut bound = row.clone();
        bound.bind_schema(&self.schema)?;
        Ok(Cow::Owned(bound))
    }

    fn full_key(&self, row: &Row) -> Result<RecordKey> {
        let key = RecordKey::from_row(&self.schema, row)?;
        if !key.is_complete(&self.schema) {
            let missing = &self.schema.primary_key_columns()[key.len()];
            return Err(Error::null_constraint(missing.name()));
        }
        Ok(key)
    }

    fn bound_key(&self, bound: Bound<&Row>) -> Result<Bound<RecordKey>> {
        Ok(match bound {
            Bound::Included(row) => Bound::Included(self.prefix_key(row)?),
            Bound::Excluded(row) => Bound::Excluded(self.prefix_key(row)?),
            Bound::Unbounded => Bound::Unbounded,
        })
    }

    fn prefix_key(&self, row: &Row) -> Result<RecordKey> {
        let row = self.bind(row)?;
        RecordKey::from_row(&self.schema, &row)
    }

    fn decode_all(&self, records: Vec<&[u8]>) -> Result<Vec<Row>> {
        records
            .into_iter()
            .map(|bytes| self.schema.decode_row(bytes))
            .collect()
    }
}

impl<S: RecordStore> core::fmt::Debug for Table<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("columns", &self.schema.len())
            .field("records", &self.store.len())
            .finish()
    }
}
