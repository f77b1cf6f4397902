//! The bound statement representation consumed by the planner.
//!
//! Parsing and name resolution happen upstream; what arrives here is a
//! [`Query`]: the resolved AST kind plus the flat, table-qualified lists
//! the binder extracted from it (tables, conditions, projection columns,
//! aggregates, grouping, ordering, values, assignments).

mod expr;

pub use expr::{
    AggFunc, AggregateExpr, CompOp, Condition, GroupByExpr, Operand, OrderByExpr, OrderDir,
    SetClause,
};

use stratadb_core::{ColumnDef, ColumnRef, Value};

/// A field declaration under CREATE TABLE.
///
/// Only column definitions are plannable; constraint clauses are
/// recognized by the parser but rejected by the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableField {
    /// A column definition.
    Column(ColumnDef),
    /// A PRIMARY KEY constraint over the named columns.
    PrimaryKey(Vec<String>),
}

/// A bound statement, dispatched on by the planner.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `CREATE TABLE <table> (<fields>)`
    CreateTable {
        /// The table to create.
        table: String,
        /// The declared fields.
        fields: Vec<TableField>,
    },
    /// `DROP TABLE <table>`
    DropTable {
        /// The table to drop.
        table: String,
    },
    /// `CREATE INDEX <table> (<columns>)`
    CreateIndex {
        /// The indexed table.
        table: String,
        /// The key columns, in declaration order.
        columns: Vec<String>,
    },
    /// `DROP INDEX <table> (<columns>)`
    DropIndex {
        /// The indexed table.
        table: String,
        /// The key columns identifying the index.
        columns: Vec<String>,
    },
    /// `INSERT INTO <table> VALUES (...)`
    Insert {
        /// The target table.
        table: String,
    },
    /// `DELETE FROM <table> [WHERE ...]`
    Delete {
        /// The target table.
        table: String,
    },
    /// `UPDATE <table> SET ... [WHERE ...]`
    Update {
        /// The target table.
        table: String,
    },
    /// `SELECT ... FROM ... [WHERE ...] [GROUP BY ...] [ORDER BY ...]`
    Select {
        /// Whether an ORDER BY clause is present.
        has_sort: bool,
    },
}

/// A bound query: the statement kind plus everything the binder resolved
/// out of it.
///
/// The planner consumes `conds` destructively; each condition ends up in
/// exactly one node of the produced plan tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The root bound AST node.
    pub parse: Statement,
    /// The referenced tables, in FROM order.
    pub tables: Vec<String>,
    /// The flattened WHERE conditions.
    pub conds: Vec<Condition>,
    /// The projection columns.
    pub cols: Vec<ColumnRef>,
    /// The aggregate expressions in the select list.
    pub aggregates: Vec<AggregateExpr>,
    /// The GROUP BY clause (keys + HAVING).
    pub group_by: GroupByExpr,
    /// The ORDER BY clause.
    pub order_by: OrderByExpr,
    /// The row values (INSERT).
    pub values: Vec<Value>,
    /// The assignments (UPDATE).
    pub set_clauses: Vec<SetClause>,
}

impl Query {
    /// Creates a query around a bound statement, with all lists empty.
    #[must_use]
    pub fn new(parse: Statement) -> Self {
        Self {
            parse,
            tables: vec![],
            conds: vec![],
            cols: vec![],
            aggregates: vec![],
            group_by: GroupByExpr::default(),
            order_by: OrderByExpr::default(),
            values: vec![],
            set_clauses: vec![],
        }
    }

    /// Creates a SELECT query over the given tables.
    #[must_use]
    pub fn select(tables: Vec<&str>) -> Self {
        Self::new(Statement::Select { has_sort: false })
            .with_tables(tables.into_iter().map(Into::into).collect())
    }

    /// Creates an INSERT query carrying the given row values.
    #[must_use]
    pub fn insert(table: impl Into<String>, values: Vec<Value>) -> Self {
        let mut query = Self::new(Statement::Insert { table: table.into() });
        query.values = values;
        query
    }

    /// Creates a DELETE query with the given WHERE conditions.
    #[must_use]
    pub fn delete(table: impl Into<String>, conds: Vec<Condition>) -> Self {
        let table = table.into();
        let mut query = Self::new(Statement::Delete { table: table.clone() });
        query.tables = vec![table];
        query.conds = conds;
        query
    }

    /// Creates an UPDATE query with assignments and WHERE conditions.
    #[must_use]
    pub fn update(
        table: impl Into<String>,
        set_clauses: Vec<SetClause>,
        conds: Vec<Condition>,
    ) -> Self {
        let table = table.into();
        let mut query = Self::new(Statement::Update { table: table.clone() });
        query.tables = vec![table];
        query.conds = conds;
        query.set_clauses = set_clauses;
        query
    }

    /// Sets the referenced tables.
    #[must_use]
    pub fn with_tables(mut self, tables: Vec<String>) -> Self {
        self.tables = tables;
        self
    }

    /// Sets the WHERE conditions.
    #[must_use]
    pub fn with_conditions(mut self, conds: Vec<Condition>) -> Self {
        self.conds = conds;
        self
    }

    /// Sets the projection columns.
    #[must_use]
    pub fn with_columns(mut self, cols: Vec<ColumnRef>) -> Self {
        self.cols = cols;
        self
    }

    /// Sets the aggregate expressions.
    #[must_use]
    pub fn with_aggregates(mut self, aggregates: Vec<AggregateExpr>) -> Self {
        self.aggregates = aggregates;
        self
    }

    /// Sets the GROUP BY clause.
    #[must_use]
    pub fn with_group_by(mut self, group_by: GroupByExpr) -> Self {
        self.group_by = group_by;
        self
    }

    /// Sets the ORDER BY clause and marks the statement as sorted.
    ///
    /// Only meaningful on SELECT.
    #[must_use]
    pub fn with_order_by(mut self, order_by: OrderByExpr) -> Self {
        if let Statement::Select { has_sort } = &mut self.parse {
            *has_sort = true;
        }
        self.order_by = order_by;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_builder_shape() {
        let query = Query::select(vec!["t", "u"])
            .with_conditions(vec![Condition::eq_value("t", "a", 1i64)]);
        assert_eq!(query.parse, Statement::Select { has_sort: false });
        assert_eq!(query.tables, vec!["t".to_string(), "u".to_string()]);
        assert_eq!(query.conds.len(), 1);
    }

    #[test]
    fn order_by_marks_has_sort() {
        let query = Query::select(vec!["t"])
            .with_order_by(OrderByExpr::desc(vec![ColumnRef::new("t", "a")]));
        assert_eq!(query.parse, Statement::Select { has_sort: true });
        assert_eq!(query.order_by.dir, OrderDir::Desc);
    }

    #[test]
    fn update_builder_carries_assignments() {
        let query = Query::update(
            "t",
            vec![SetClause::new("b", 9i64)],
            vec![Condition::eq_value("t", "a", 1i64)],
        );
        assert_eq!(query.parse, Statement::Update { table: "t".into() });
        assert_eq!(query.set_clauses.len(), 1);
        assert_eq!(query.tables, vec!["t".to_string()]);
    }
}
