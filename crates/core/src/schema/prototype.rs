//! Schema definition and validation.

use super::column::ColumnDescriptor;
use super::layout::RecordLayout;
use crate::error::{Error, Result};
use crate::limits::MAX_COLUMN_NAME_LEN;
use crate::row::Row;
use crate::types::DataType;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use hashbrown::HashMap;

/// A validated table schema.
///
/// Columns are stored in canonical layout order: primary-key columns first
/// in declaration order, then fixed-size columns by (size, name), then
/// variable-length columns by (size, name). Cloning is cheap and every clone
/// shares the same columns and layout.
#[derive(Clone, Debug)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

#[derive(Debug)]
struct SchemaInner {
    columns: Vec<Arc<ColumnDescriptor>>,
    by_name: HashMap<String, usize>,
    layout: RecordLayout,
    is_static: bool,
}

impl Schema {
    /// Starts a new schema definition.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Returns the columns in canonical order.
    #[inline]
    pub fn columns(&self) -> &[Arc<ColumnDescriptor>] {
        &self.inner.columns
    }

    /// Gets a column by name.
    pub fn column(&self, name: &str) -> Option<&Arc<ColumnDescriptor>> {
        self.inner.by_name.get(name).map(|&i| &self.inner.columns[i])
    }

    /// Gets the canonical position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.inner.by_name.get(name).copied()
    }

    /// Gets the column at a canonical position.
    pub fn column_at(&self, index: usize) -> Option<&Arc<ColumnDescriptor>> {
        self.inner.columns.get(index)
    }

    /// Returns the number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.columns.len()
    }

    /// Always false for a built schema.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.columns.is_empty()
    }

    /// Returns true if every column is fixed-size.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.inner.is_static
    }

    /// Returns the record layout.
    #[inline]
    pub fn layout(&self) -> &RecordLayout {
        &self.inner.layout
    }

    /// Returns the primary-key columns, which lead the canonical order.
    pub fn primary_key_columns(&self) -> &[Arc<ColumnDescriptor>] {
        &self.inner.columns[..self.inner.layout.primary_key_count()]
    }

    /// Returns the primary-key column names in canonical order.
    pub fn primary_key_names(&self) -> Vec<&str> {
        self.primary_key_columns().iter().map(|c| c.name()).collect()
    }

    /// Returns true if both handles refer to the same schema.
    pub fn same_as(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Checks whether `names` is a leading run of the primary key.
    ///
    /// The order of `names` does not matter; they must cover the first
    /// primary-key columns with no gap and nothing else.
    pub fn is_primary_key_prefix(&self, names: &[&str]) -> bool {
        let covered = self
            .primary_key_columns()
            .iter()
            .take_while(|c| names.contains(&c.name()))
            .count();
        names.len() == covered
    }

    /// Builds a row holding only the primary-key fields present in `row`,
    /// typed under their schema columns.
    pub fn extract_primary_key_row(&self, row: &Row) -> Result<Row> {
        let mut key = Row::new();
        for column in self.primary_key_columns() {
            if let Some(field) = row.field(column.name()) {
                let field = field.with_column(Arc::clone(column))?;
                key.set_field_with(column.name(), field, Arc::clone(column));
            }
        }
        Ok(key)
    }

    /// Verifies that a row's data fits this schema.
    ///
    /// Every non-nullable column needs a value, every value must have the
    /// column's type and fit the column's size. A row bound to this schema
    /// that passed stays validated until it is mutated or rebound; other
    /// rows are checked every time.
    pub fn validate_row(&self, row: &Row) -> Result<()> {
        let bound_here = row.schema().is_some_and(|s| s.same_as(self));
        if bound_here && row.is_validated() {
            return Ok(());
        }
        for column in self.columns() {
            match row.field(column.name()).filter(|f| !f.is_null()) {
                None if !column.is_nullable() => {
                    return Err(Error::null_constraint(column.name()));
                }
                None => {}
                Some(field) => {
                    if field.data_type() != column.data_type() {
                        return Err(Error::type_mismatch(column.data_type(), field.data_type()));
                    }
                    if field.byte_len() > column.size() {
                        return Err(Error::value_too_large(
                            column.name(),
                            field.byte_len(),
                            column.size(),
                        ));
                    }
                }
            }
        }
        if bound_here {
            row.mark_validated();
        }
        Ok(())
    }
}

/// Builder for schema definitions.
#[derive(Clone, Debug)]
pub struct SchemaBuilder {
    columns: Vec<ColumnDescriptor>,
    is_static: bool,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    /// Creates an empty schema builder.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            is_static: true,
        }
    }

    /// Appends a column.
    pub fn add_column(mut self, column: ColumnDescriptor) -> Self {
        self.push(column);
        self
    }

    /// Appends a column with the type's default layout.
    pub fn column(self, name: impl Into<String>, data_type: DataType) -> Self {
        self.add_column(ColumnDescriptor::new(name, data_type))
    }

    /// Appends a column in place.
    pub fn push(&mut self, column: ColumnDescriptor) {
        if column.is_variable_length() {
            self.is_static = false;
        }
        self.columns.push(column);
    }

    /// Returns true if every column added so far is fixed-size.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Returns the number of columns added so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no column was added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Validates the columns, sorts them into canonical order and computes
    /// the record layout.
    pub fn build(self) -> Result<Schema> {
        let violations = Self::check_columns(&self.columns);
        if !violations.is_empty() {
            tracing::debug!(violations = violations.len(), "schema validation failed");
            return Err(Error::invalid_schema(violations));
        }

        let mut columns = self.columns;
        columns.sort_by(canonical_order);
        let columns: Vec<Arc<ColumnDescriptor>> = columns.into_iter().map(Arc::new).collect();

        let by_name = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name().to_string(), i))
            .collect();
        let layout = RecordLayout::compute(&columns);

        tracing::debug!(
            columns = columns.len(),
            header_size = layout.header_size(),
            primary_key_size = layout.primary_key_size(),
            max_record_size = layout.max_record_size(),
            "schema validated"
        );

        Ok(Schema {
            inner: Arc::new(SchemaInner {
                columns,
                by_name,
                layout,
                is_static: self.is_static,
            }),
        })
    }

    /// Collects every rule the columns violate.
    fn check_columns(columns: &[ColumnDescriptor]) -> Vec<String> {
        let mut violations = Vec::new();
        if columns.is_empty() {
            violations.push("a schema needs at least one column".into());
        }
        for (x, col) in columns.iter().enumerate() {
            let len = col.name().chars().count();
            if len < 1 || len > MAX_COLUMN_NAME_LEN {
                violations.push(format!(
                    "column {} has a name of {} characters, allowed 1..={}",
                    x, len, MAX_COLUMN_NAME_LEN
                ));
            }
            if col.is_primary_key() && col.is_nullable() {
                violations.push(format!(
                    "column {} cannot be nullable and part of the primary key",
                    col.name()
                ));
            }
            if col.is_primary_key() && col.is_variable_length() {
                violations.push(format!(
                    "column {} cannot be variable-length and part of the primary key",
                    col.name()
                ));
            }
            for (y, other) in columns.iter().enumerate().skip(x + 1) {
                if col.matches_name(other.name()) {
                    violations.push(format!("columns {} and {} have the same name", x, y));
                }
            }
        }
        violations
    }
}

fn canonical_order(a: &ColumnDescriptor, b: &ColumnDescriptor) -> Ordering {
    match (a.is_primary_key(), b.is_primary_key()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a
            .is_variable_length()
            .cmp(&b.is_variable_length())
            .then(a.size().cmp(&b.size()))
            .then_with(|| a.name().cmp(b.name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn people() -> SchemaBuilder {
        Schema::builder()
            .add_column(ColumnDescriptor::string("name", 40).nullable(true))
            .add_column(ColumnDescriptor::new("id", DataType::Integer).primary_key(true))
            .add_column(ColumnDescriptor::new("score", DataType::Double))
            .add_column(ColumnDescriptor::new("age", DataType::Integer).nullable(true))
            .add_column(ColumnDescriptor::new("active", DataType::Boolean))
    }

    fn names(schema: &Schema) -> Vec<&str> {
        schema.columns().iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_canonical_order() {
        let schema = people().build().unwrap();
        assert_eq!(names(&schema), vec!["id", "active", "age", "score", "name"]);
        assert!(!schema.is_static());
        assert_eq!(schema.column_index("score"), Some(3));
        assert_eq!(schema.column("name").unwrap().size(), 40);
        assert!(schema.column("missing").is_none());
    }

    #[test]
    fn test_primary_keys_keep_declaration_order() {
        let schema = Schema::builder()
            .add_column(ColumnDescriptor::new("z", DataType::Long).primary_key(true))
            .column("m", DataType::Integer)
            .add_column(ColumnDescriptor::new("a", DataType::Integer).primary_key(true))
            .build()
            .unwrap();
        assert_eq!(names(&schema), vec!["z", "a", "m"]);
        assert_eq!(schema.primary_key_names(), vec!["z", "a"]);
        assert_eq!(schema.layout().primary_key_size(), 12);
    }

    #[test]
    fn test_canonical_order_is_stable_across_input_orders() {
        let first = people().build().unwrap();
        let mut reversed = people().columns;
        reversed.reverse();
        let mut builder = Schema::builder();
        for col in reversed {
            builder.push(col);
        }
        let second = builder.build().unwrap();

        assert_eq!(names(&first), names(&second));
        assert_eq!(first.layout(), second.layout());
    }

    #[test]
    fn test_layout_constants() {
        let schema = people().build().unwrap();
        let layout = schema.layout();
        assert_eq!(layout.header_size(), 1);
        assert_eq!(layout.null_bit(2), Some(1)); // age
        assert_eq!(layout.null_bit(4), Some(2)); // name
        // 1 + id(4) + active(1) + age(4) + score(8) + name(40 + 4)
        assert_eq!(layout.max_record_size(), 62);
    }

    #[test]
    fn test_empty_schema_is_rejected() {
        let err = Schema::builder().build().unwrap_err();
        assert!(matches!(err, Error::InvalidSchema { .. }));
    }

    #[test]
    fn test_every_violation_is_reported() {
        let long_name: String = core::iter::repeat('x').take(241).collect();
        let err = Schema::builder()
            .add_column(
                ColumnDescriptor::new("id", DataType::Integer)
                    .primary_key(true)
                    .nullable(true),
            )
            .add_column(ColumnDescriptor::string("code", 8).primary_key(true))
            .add_column(ColumnDescriptor::new("", DataType::Integer))
            .add_column(ColumnDescriptor::new(long_name, DataType::Integer))
            .add_column(ColumnDescriptor::new("ID", DataType::Long))
            .build()
            .unwrap_err();

        match err {
            Error::InvalidSchema { violations } => {
                assert_eq!(violations.len(), 5, "{:?}", violations);
                assert!(violations.iter().any(|v| v.contains("nullable")));
                assert!(violations.iter().any(|v| v.contains("variable-length")));
                assert!(violations.iter().any(|v| v.contains("same name")));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_static_schema() {
        let builder = Schema::builder()
            .column("a", DataType::Integer)
            .add_column(ColumnDescriptor::string("b", 4).fixed_size(4));
        assert!(builder.is_static());
        assert!(builder.build().unwrap().is_static());
    }

    #[test]
    fn test_primary_key_prefix() {
        let schema = Schema::builder()
            .add_column(ColumnDescriptor::new("a", DataType::Integer).primary_key(true))
            .add_column(ColumnDescriptor::new("b", DataType::Integer).primary_key(true))
            .add_column(ColumnDescriptor::string("c", 10))
            .build()
            .unwrap();

        assert!(schema.is_primary_key_prefix(&["a"]));
        assert!(schema.is_primary_key_prefix(&["a", "b"]));
        assert!(schema.is_primary_key_prefix(&["b", "a"]));
        assert!(!schema.is_primary_key_prefix(&["b"]));
        assert!(!schema.is_primary_key_prefix(&["a", "c"]));
        assert!(!schema.is_primary_key_prefix(&["a", "b", "c"]));
    }

    #[test]
    fn test_extract_primary_key_row() {
        let schema = Schema::builder()
            .add_column(ColumnDescriptor::new("a", DataType::Integer).primary_key(true))
            .add_column(ColumnDescriptor::new("b", DataType::Integer).primary_key(true))
            .add_column(ColumnDescriptor::string("c", 10))
            .build()
            .unwrap();

        let mut row = Row::new();
        row.set_int("a", 1);
        row.set_int("b", 2);
        row.set_string("c", "x");

        let key = schema.extract_primary_key_row(&row).unwrap();
        assert_eq!(key.len(), 2);
        assert_eq!(key.get_int("a").unwrap(), Some(1));
        assert_eq!(key.column_metadata("b").unwrap().name(), "b");
        assert!(!key.contains_column("c"));
    }

    #[test]
    fn test_validate_row() {
        let schema = people().build().unwrap();
        let mut row = Row::new();
        row.set_int("id", 1);
        row.set_double("score", 1.0);
        assert_eq!(schema.validate_row(&row), Err(Error::null_constraint("active")));

        row.set_boolean("active", true);
        row.set_string("name", &"n".repeat(41));
        assert!(matches!(schema.validate_row(&row), Err(Error::ValueTooLarge { .. })));

        row.set_string("name", "short");
        assert!(schema.validate_row(&row).is_ok());
        assert!(!row.is_validated());

        row.bind_schema(&schema).unwrap();
        assert!(schema.validate_row(&row).is_ok());
        assert!(row.is_validated());

        row.set_long("score", 3);
        assert!(!row.is_validated());
        assert_eq!(
            schema.validate_row(&row),
            Err(Error::type_mismatch(DataType::Double, DataType::Long))
        );
    }

    #[test]
    fn test_validation_does_not_carry_across_schemas() {
        let wide = Schema::builder()
            .add_column(ColumnDescriptor::new("id", DataType::Integer).primary_key(true))
            .add_column(ColumnDescriptor::string("s", 16).fixed_size(16))
            .build()
            .unwrap();
        let narrow = Schema::builder()
            .add_column(ColumnDescriptor::new("id", DataType::Integer).primary_key(true))
            .add_column(ColumnDescriptor::string("s", 2).fixed_size(2))
            .build()
            .unwrap();

        let mut row = Row::new();
        row.set_int("id", 1);
        row.set_string("s", "abcdefgh");
        row.bind_schema(&wide).unwrap();
        assert!(wide.validate_row(&row).is_ok());
        assert!(row.is_validated());

        assert!(matches!(narrow.validate_row(&row), Err(Error::ValueTooLarge { .. })));

        // validating an unbound row never marks it
        let mut loose = Row::new();
        loose.set_int("id", 1);
        loose.set_string("s", "abcdefgh");
        assert!(wide.validate_row(&loose).is_ok());
        assert!(!loose.is_validated());
        assert!(narrow.validate_row(&loose).is_err());
    }
}
