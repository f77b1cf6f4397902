//! Bound predicate and clause expressions.
//!
//! The binder flattens every WHERE clause into a list of [`Condition`]s
//! of the shape `column <op> operand`, where the operand is either a
//! literal or another qualified column. The planner consumes that list
//! destructively, routing each condition into exactly one plan node.

use std::fmt;

use stratadb_core::{ColumnRef, Value};

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompOp {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl CompOp {
    /// Returns the operator that preserves the predicate's truth when the
    /// two sides are exchanged: `a < b` iff `b > a`, and so on. Equality
    /// and inequality are their own mirrors.
    #[must_use]
    pub const fn mirror(self) -> Self {
        match self {
            Self::Eq => Self::Eq,
            Self::Ne => Self::Ne,
            Self::Lt => Self::Gt,
            Self::Gt => Self::Lt,
            Self::Le => Self::Ge,
            Self::Ge => Self::Le,
        }
    }
}

impl fmt::Display for CompOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
        };
        write!(f, "{symbol}")
    }
}

/// The right-hand side of a condition: a literal or a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A qualified column reference (inter-column predicate).
    Column(ColumnRef),
    /// A literal value (single-sided predicate).
    Literal(Value),
}

impl Operand {
    /// Returns the column reference, if this operand is a column.
    #[must_use]
    pub const fn as_column(&self) -> Option<&ColumnRef> {
        match self {
            Self::Column(col) => Some(col),
            Self::Literal(_) => None,
        }
    }

    /// Returns true if this operand is a literal value.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl From<ColumnRef> for Operand {
    fn from(col: ColumnRef) -> Self {
        Self::Column(col)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(col) => write!(f, "{col}"),
            Self::Literal(value) => write!(f, "{value}"),
        }
    }
}

/// A bound comparison predicate: `lhs <op> rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// The left-hand column.
    pub lhs: ColumnRef,
    /// The comparison operator.
    pub op: CompOp,
    /// The right-hand operand.
    pub rhs: Operand,
}

impl Condition {
    /// Creates a new condition.
    #[must_use]
    pub fn new(lhs: ColumnRef, op: CompOp, rhs: impl Into<Operand>) -> Self {
        Self { lhs, op, rhs: rhs.into() }
    }

    /// Creates an equality against a literal: `table.column = value`.
    #[must_use]
    pub fn eq_value(
        table: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(ColumnRef::new(table, column), CompOp::Eq, Operand::Literal(value.into()))
    }

    /// Creates a column-to-column equality: `l.lc = r.rc`.
    #[must_use]
    pub fn eq_columns(lhs: ColumnRef, rhs: ColumnRef) -> Self {
        Self::new(lhs, CompOp::Eq, Operand::Column(rhs))
    }

    /// Returns true if the right-hand side is a literal value.
    #[must_use]
    pub const fn has_literal_rhs(&self) -> bool {
        self.rhs.is_literal()
    }

    /// Returns the right-hand column, if this is an inter-column predicate.
    #[must_use]
    pub const fn rhs_column(&self) -> Option<&ColumnRef> {
        self.rhs.as_column()
    }

    /// Exchanges the two sides of an inter-column predicate, rewriting the
    /// operator through [`CompOp::mirror`] so the truth value is preserved.
    /// No-op when the right-hand side is a literal.
    pub fn mirror_swap(&mut self) {
        if let Operand::Column(rhs_col) = &mut self.rhs {
            std::mem::swap(&mut self.lhs, rhs_col);
            self.op = self.op.mirror();
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

/// An aggregate function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFunc {
    /// `COUNT`
    Count,
    /// `SUM`
    Sum,
    /// `AVG`
    Avg,
    /// `MAX`
    Max,
    /// `MIN`
    Min,
}

impl fmt::Display for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Max => "MAX",
            Self::Min => "MIN",
        };
        write!(f, "{name}")
    }
}

/// A bound aggregate expression, e.g. `SUM(t.amount) AS total`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateExpr {
    /// The aggregate function.
    pub func: AggFunc,
    /// The argument column. `None` means `*` (COUNT only).
    pub column: Option<ColumnRef>,
    /// Output column alias, if one was given.
    pub alias: Option<String>,
}

impl AggregateExpr {
    /// Creates an aggregate over a column.
    #[must_use]
    pub fn new(func: AggFunc, column: ColumnRef) -> Self {
        Self { func, column: Some(column), alias: None }
    }

    /// Creates a `COUNT(*)` aggregate.
    #[must_use]
    pub const fn count_star() -> Self {
        Self { func: AggFunc::Count, column: None, alias: None }
    }

    /// Sets the output alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl fmt::Display for AggregateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.column {
            Some(col) => write!(f, "{}({col})", self.func)?,
            None => write!(f, "{}(*)", self.func)?,
        }
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        Ok(())
    }
}

/// The bound GROUP BY clause: key columns plus the HAVING conditions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupByExpr {
    /// The grouping key columns. Empty means no GROUP BY clause.
    pub keys: Vec<ColumnRef>,
    /// HAVING conditions over the grouped output. Empty means absent.
    pub having: Vec<Condition>,
}

impl GroupByExpr {
    /// Creates a group-by over the given keys.
    #[must_use]
    pub fn new(keys: Vec<ColumnRef>) -> Self {
        Self { keys, having: vec![] }
    }

    /// Sets the HAVING conditions.
    #[must_use]
    pub fn with_having(mut self, having: Vec<Condition>) -> Self {
        self.having = having;
        self
    }

    /// Returns true if no grouping keys were bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDir {
    /// Ascending (the default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// The bound ORDER BY clause. One direction applies to all keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderByExpr {
    /// The sort key columns.
    pub keys: Vec<ColumnRef>,
    /// The shared sort direction.
    pub dir: OrderDir,
}

impl OrderByExpr {
    /// Creates an ascending order-by.
    #[must_use]
    pub fn asc(keys: Vec<ColumnRef>) -> Self {
        Self { keys, dir: OrderDir::Asc }
    }

    /// Creates a descending order-by.
    #[must_use]
    pub fn desc(keys: Vec<ColumnRef>) -> Self {
        Self { keys, dir: OrderDir::Desc }
    }
}

/// A single `SET column = value` assignment under UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    /// The target column name (UPDATE is single-table, so unqualified).
    pub column: String,
    /// The value to assign.
    pub value: Value,
}

impl SetClause {
    /// Creates a new assignment.
    #[must_use]
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { column: column.into(), value: value.into() }
    }
}

impl fmt::Display for SetClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}
