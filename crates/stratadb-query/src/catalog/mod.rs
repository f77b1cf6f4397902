//! The catalog contract the planner reads.
//!
//! The planner needs exactly two answers from the schema layer: "what is
//! the schema of table T?" and "what indexes exist on T, with which key
//! columns in which order?". [`Catalog`] is the snapshot answering both.
//! The caller is responsible for holding any catalog lock for the
//! duration of a planning call; the planner treats the snapshot as
//! immutable.

use stratadb_core::ColumnDef;

/// Metadata for one index: its name and ordered key columns.
///
/// Column order is significant; it encodes the leading-prefix rule used
/// during index matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMeta {
    /// The index name.
    pub name: String,
    /// The key columns, in declaration order.
    pub columns: Vec<String>,
}

impl IndexMeta {
    /// Creates index metadata over the given key columns.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<&str>) -> Self {
        Self { name: name.into(), columns: columns.into_iter().map(Into::into).collect() }
    }

    /// Returns the first key column, if any.
    #[must_use]
    pub fn leading_column(&self) -> Option<&str> {
        self.columns.first().map(String::as_str)
    }
}

/// Metadata for one table: its column schema and its indexes.
#[derive(Debug, Clone, PartialEq)]
pub struct TableMeta {
    /// The table name.
    pub name: String,
    /// The column schema, in declaration order.
    pub columns: Vec<ColumnDef>,
    /// The indexes on this table, in declaration order.
    pub indexes: Vec<IndexMeta>,
}

impl TableMeta {
    /// Creates metadata for an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), columns: vec![], indexes: vec![] }
    }

    /// Adds a column to the schema.
    #[must_use]
    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds an index.
    #[must_use]
    pub fn with_index(mut self, index: IndexMeta) -> Self {
        self.indexes.push(index);
        self
    }
}

/// A catalog snapshot: the tables visible to one planning call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    tables: Vec<TableMeta>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table.
    #[must_use]
    pub fn with_table(mut self, table: TableMeta) -> Self {
        self.tables.push(table);
        self
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableMeta> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Returns the indexes on a table, or an empty slice if the table is
    /// unknown.
    #[must_use]
    pub fn indexes(&self, table: &str) -> &[IndexMeta] {
        self.table(table).map_or(&[], |t| t.indexes.as_slice())
    }
}
