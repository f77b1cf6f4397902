//! Column references and schema descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An unambiguous reference to a column of a named table.
///
/// The binder resolves every bare column name to its owning table before
/// planning, so a `ColumnRef` always carries both parts. Two references
/// are equal iff both the table and the column name match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// The owning table's name.
    pub table: String,
    /// The column name within the table.
    pub column: String,
}

impl ColumnRef {
    /// Creates a new qualified column reference.
    #[must_use]
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self { table: table.into(), column: column.into() }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// The declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point number.
    Float,
    /// Fixed-width character string.
    Char {
        /// The declared width in characters.
        width: usize,
    },
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "INT"),
            Self::Float => write!(f, "FLOAT"),
            Self::Char { width } => write!(f, "CHAR({width})"),
        }
    }
}

/// A column declaration, as it appears under CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// The column name.
    pub name: String,
    /// The declared type.
    pub ty: ColumnType,
}

impl ColumnDef {
    /// Creates a new column definition.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self { name: name.into(), ty }
    }

    /// Creates an INT column.
    #[must_use]
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Int)
    }

    /// Creates a FLOAT column.
    #[must_use]
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Float)
    }

    /// Creates a CHAR column of the given width.
    #[must_use]
    pub fn char(name: impl Into<String>, width: usize) -> Self {
        Self::new(name, ColumnType::Char { width })
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_ref_equality() {
        assert_eq!(ColumnRef::new("t", "a"), ColumnRef::new("t", "a"));
        assert_ne!(ColumnRef::new("t", "a"), ColumnRef::new("u", "a"));
        assert_ne!(ColumnRef::new("t", "a"), ColumnRef::new("t", "b"));
    }

    #[test]
    fn qualified_display() {
        assert_eq!(ColumnRef::new("orders", "total").to_string(), "orders.total");
    }

    #[test]
    fn column_def_display() {
        assert_eq!(ColumnDef::int("id").to_string(), "id INT");
        assert_eq!(ColumnDef::char("name", 32).to_string(), "name CHAR(32)");
    }
}
