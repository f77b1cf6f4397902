//! The physical planner.
//!
//! This module converts bound statements into physical plans: it picks
//! an access path per table, assembles the join tree from the condition
//! pool, and stacks the cap operators (group-by, sort, projection) on
//! top. DDL and DML statements take their own short paths.

use tracing::debug;

use stratadb_core::ColumnRef;

use crate::ast::{Condition, OrderDir, Query, Statement, TableField};
use crate::catalog::{Catalog, TableMeta};
use crate::config::PlanConfig;
use crate::error::{PlanError, PlanResult};
use crate::plan::optimize::{pop_conds, push_condition, IndexSelector, Optimizer, PushDown};

use super::node::{
    DdlNode, DmlNode, GroupByNode, IndexScanNode, Plan, ProjectNode, SeqScanNode, SortNode,
};

/// The query planner.
///
/// A pure function from bound statement to plan tree: it allocates every
/// node fresh per call, performs no I/O, and keeps no state across calls
/// beyond the process-wide join knobs it snapshots once per statement.
///
/// # Example
///
/// ```
/// use stratadb_core::ColumnDef;
/// use stratadb_query::ast::{Condition, Query};
/// use stratadb_query::catalog::{Catalog, IndexMeta, TableMeta};
/// use stratadb_query::plan::Planner;
///
/// let catalog = Catalog::new().with_table(
///     TableMeta::new("users")
///         .with_column(ColumnDef::int("id"))
///         .with_index(IndexMeta::new("users_id", vec!["id"])),
/// );
///
/// let query = Query::select(vec!["users"])
///     .with_conditions(vec![Condition::eq_value("users", "id", 1i64)]);
///
/// let plan = Planner::new(catalog).plan_statement(query).unwrap();
/// println!("{}", plan.display_tree());
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    /// Catalog snapshot for index and schema lookups.
    catalog: Catalog,
    /// Index matching over scan predicates and join keys.
    selector: IndexSelector,
    /// The logical rewrite pipeline.
    optimizer: Optimizer,
    /// Pinned knob snapshot; `None` reads the process-wide knobs.
    config: Option<PlanConfig>,
}

impl Planner {
    /// Creates a planner over a catalog snapshot.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, selector: IndexSelector::new(), optimizer: Optimizer::new(), config: None }
    }

    /// Pins the join knobs instead of reading the process-wide values.
    #[must_use]
    pub const fn with_config(mut self, config: PlanConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Returns a reference to the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Produces the plan for a bound statement.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoJoinExecutor`] when a join is required but
    /// both join knobs are off, and [`PlanError::Internal`] on
    /// contract violations by the upstream binder (unexpected field
    /// shapes, unknown tables, malformed join predicates).
    pub fn plan_statement(&self, query: Query) -> PlanResult<Plan> {
        debug!(kind = statement_kind(&query.parse), "planning statement");
        match query.parse.clone() {
            Statement::CreateTable { table, fields } => {
                let mut column_defs = Vec::with_capacity(fields.len());
                for field in fields {
                    match field {
                        TableField::Column(def) => column_defs.push(def),
                        TableField::PrimaryKey(_) => {
                            return Err(PlanError::internal(
                                "unexpected field type under CREATE TABLE",
                            ));
                        }
                    }
                }
                Ok(Plan::Ddl(DdlNode::create_table(table, column_defs)))
            }
            Statement::DropTable { table } => Ok(Plan::Ddl(DdlNode::drop_table(table))),
            Statement::CreateIndex { table, columns } => {
                Ok(Plan::Ddl(DdlNode::create_index(table, columns)))
            }
            Statement::DropIndex { table, columns } => {
                Ok(Plan::Ddl(DdlNode::drop_index(table, columns)))
            }
            Statement::Insert { table } => Ok(Plan::dml(DmlNode::insert(table, query.values))),
            Statement::Delete { table } => {
                let scan = self.build_target_scan(&table, &query.conds)?;
                Ok(Plan::dml(DmlNode::delete(table, scan, query.conds)))
            }
            Statement::Update { table } => {
                let scan = self.build_target_scan(&table, &query.conds)?;
                Ok(Plan::dml(DmlNode::update(table, scan, query.conds, query.set_clauses)))
            }
            Statement::Select { .. } => self.plan_select(query),
        }
    }

    /// Plans a SELECT: logical rewrite, relational assembly, then the
    /// cap operators, wrapped in the statement root.
    fn plan_select(&self, query: Query) -> PlanResult<Plan> {
        let query = self.optimizer.rewrite(query);
        let config = self.config.unwrap_or_else(PlanConfig::current);

        let Query { parse, tables, mut conds, cols, aggregates, group_by, order_by, .. } = query;
        let Statement::Select { has_sort } = parse else {
            return Err(PlanError::internal("non-SELECT statement in the select planner"));
        };

        let mut subtree = self.build_relation(&tables, &mut conds, config)?;

        // Grouping applies with explicit keys or with any aggregate in
        // the select list (an aggregate without GROUP BY is one group).
        if !group_by.is_empty() || !aggregates.is_empty() {
            let node = GroupByNode::new(group_by.keys, aggregates.clone())
                .with_having(group_by.having)
                .with_output(cols.clone());
            subtree = Plan::group_by(subtree, node);
        }

        if has_sort {
            let node = match order_by.dir {
                OrderDir::Asc => SortNode::asc(order_by.keys),
                OrderDir::Desc => SortNode::desc(order_by.keys),
            };
            subtree = Plan::sort(subtree, node);
        }

        subtree = Plan::projection(subtree, ProjectNode::new(cols, aggregates));
        Ok(Plan::dml(DmlNode::select(subtree)))
    }

    /// Builds the relational subtree for a SELECT's FROM/WHERE: one scan
    /// per table, then a join tree consuming the inter-table predicates,
    /// then cross products for any table left unreferenced by them.
    fn build_relation(
        &self,
        tables: &[String],
        conds: &mut Vec<Condition>,
        config: PlanConfig,
    ) -> PlanResult<Plan> {
        if tables.is_empty() {
            return Err(PlanError::internal("SELECT without tables"));
        }

        // Per-table scans, each absorbing its single-table predicates.
        let mut scans: Vec<Option<Plan>> = Vec::with_capacity(tables.len());
        for table in tables {
            let table_conds = pop_conds(conds, table);
            let meta = self.table_meta(table)?;
            let scan = match self.selector.best_index(meta, &table_conds) {
                Some(index_columns) => Plan::index_scan(
                    IndexScanNode::new(table, index_columns).with_conditions(table_conds),
                ),
                None => {
                    Plan::seq_scan(SeqScanNode::new(table).with_conditions(table_conds))
                }
            };
            scans.push(Some(scan));
        }

        if tables.len() == 1 {
            return take_scan_slot(&mut scans, 0);
        }

        debug!(tables = tables.len(), join_conds = conds.len(), "assembling join tree");

        let mut joined: Vec<String> = Vec::new();
        let mut tree = if conds.is_empty() {
            // No join predicates at all: start from the first scan and
            // let the cross-product pass pick up the rest.
            take_scan_slot(&mut scans, 0)?
        } else {
            // First join: the only place the algorithm knobs apply.
            let cond = conds.remove(0);
            let rhs = join_rhs(&cond)?;
            let left = self.take_scan(&mut scans, tables, &cond.lhs, &mut joined)?;
            let right = self.take_scan(&mut scans, tables, &rhs, &mut joined)?;
            self.build_first_join(left, right, cond, config)?
        };

        // Subsequent joins always use nested loop.
        while !conds.is_empty() {
            let mut cond = conds.remove(0);
            let lhs_new = !joined.contains(&cond.lhs.table);
            let rhs_col = cond.rhs_column().cloned();
            let rhs_new = rhs_col
                .as_ref()
                .is_some_and(|rhs| !joined.contains(&rhs.table));

            let left_leaf = if lhs_new {
                Some(self.take_scan(&mut scans, tables, &cond.lhs, &mut joined)?)
            } else {
                None
            };
            let right_leaf = match (&rhs_col, rhs_new) {
                (Some(rhs), true) => {
                    Some(self.take_scan(&mut scans, tables, rhs, &mut joined)?)
                }
                _ => None,
            };

            tree = match (left_leaf, right_leaf) {
                // Both sides new: a fresh join carrying the predicate,
                // cross-producted with the accumulated tree.
                (Some(left), Some(right)) => {
                    let fresh = Plan::nested_loop(left, right, vec![cond]);
                    Plan::nested_loop(fresh, tree, vec![])
                }
                // One side new: extend the accumulated tree, swapping the
                // predicate when the new table is on its right side.
                (Some(leaf), None) => Plan::nested_loop(leaf, tree, vec![cond]),
                (None, Some(leaf)) => {
                    cond.mirror_swap();
                    Plan::nested_loop(leaf, tree, vec![cond])
                }
                // Neither side new: the predicate is residual over tables
                // already inside the tree.
                (None, None) => {
                    let mut slot = Some(cond);
                    if push_condition(&mut tree, &mut slot) != PushDown::Placed {
                        return Err(PlanError::internal(
                            "residual predicate references a table outside the join tree",
                        ));
                    }
                    tree
                }
            };
        }

        // Cross-product any table no join predicate reached.
        for slot in &mut scans {
            if let Some(scan) = slot.take() {
                tree = Plan::nested_loop(tree, scan, vec![]);
            }
        }

        Ok(tree)
    }

    /// Emits the first join according to the knob matrix. Nested loop is
    /// the default whenever it is enabled; sort-merge requires its scan
    /// inputs ordered on the join keys, so sequential scans get a sort
    /// wrapped around them while index scans pass through as-is.
    fn build_first_join(
        &self,
        left: Plan,
        right: Plan,
        cond: Condition,
        config: PlanConfig,
    ) -> PlanResult<Plan> {
        if config.enable_nestloop {
            return Ok(Plan::nested_loop(left, right, vec![cond]));
        }
        if config.enable_sortmerge {
            let left_key = cond.lhs.clone();
            let right_key = join_rhs(&cond)?;
            let left = sorted_for_merge(left, left_key)?;
            let right = sorted_for_merge(right, right_key)?;
            return Ok(Plan::merge_join(left, right, vec![cond]));
        }
        Err(PlanError::NoJoinExecutor)
    }

    /// Takes the scan for `col`'s table out of the pending set, marking
    /// the table joined. A sequential scan is re-checked against the
    /// join column: a key that was never a single-table predicate can
    /// still open an index path.
    fn take_scan(
        &self,
        scans: &mut [Option<Plan>],
        tables: &[String],
        col: &ColumnRef,
        joined: &mut Vec<String>,
    ) -> PlanResult<Plan> {
        let position = tables
            .iter()
            .position(|table| *table == col.table)
            .ok_or_else(|| {
                PlanError::internal(format!("join predicate references {col} outside FROM"))
            })?;
        let scan = take_scan_slot(scans, position)?;
        joined.push(col.table.clone());

        match scan {
            Plan::SeqScan(node) => {
                let meta = self.table_meta(&col.table)?;
                match self.selector.best_index_for_column(meta, &col.column) {
                    Some(index_columns) => Ok(Plan::index_scan(
                        IndexScanNode::new(&col.table, index_columns)
                            .with_conditions(node.conds),
                    )),
                    None => Ok(Plan::SeqScan(node)),
                }
            }
            other => Ok(other),
        }
    }

    /// Builds the single-table scan under DELETE and UPDATE.
    fn build_target_scan(&self, table: &str, conds: &[Condition]) -> PlanResult<Plan> {
        let meta = self.table_meta(table)?;
        Ok(match self.selector.best_index(meta, conds) {
            Some(index_columns) => Plan::index_scan(
                IndexScanNode::new(table, index_columns).with_conditions(conds.to_vec()),
            ),
            None => Plan::seq_scan(SeqScanNode::new(table).with_conditions(conds.to_vec())),
        })
    }

    fn table_meta(&self, name: &str) -> PlanResult<&TableMeta> {
        self.catalog
            .table(name)
            .ok_or_else(|| PlanError::internal(format!("unknown table {name} in bound query")))
    }
}

/// Takes a pending scan out of its slot, failing if it was already
/// consumed by an earlier join step.
fn take_scan_slot(scans: &mut [Option<Plan>], index: usize) -> PlanResult<Plan> {
    scans
        .get_mut(index)
        .and_then(Option::take)
        .ok_or_else(|| PlanError::internal("table scan consumed twice during join assembly"))
}

/// The right-hand column of a join predicate.
fn join_rhs(cond: &Condition) -> PlanResult<ColumnRef> {
    cond.rhs_column()
        .cloned()
        .ok_or_else(|| PlanError::internal(format!("join predicate {cond} has a literal operand")))
}

/// Wraps a merge-join input in a sort on its join key. Index scans
/// already produce key order and pass through.
fn sorted_for_merge(input: Plan, key: ColumnRef) -> PlanResult<Plan> {
    match input {
        Plan::SeqScan(_) => Ok(Plan::sort(input, SortNode::asc(vec![key]))),
        Plan::IndexScan(_) => Ok(input),
        _ => Err(PlanError::internal("bad plan while building sort-merge join")),
    }
}

fn statement_kind(statement: &Statement) -> &'static str {
    match statement {
        Statement::CreateTable { .. } => "create_table",
        Statement::DropTable { .. } => "drop_table",
        Statement::CreateIndex { .. } => "create_index",
        Statement::DropIndex { .. } => "drop_index",
        Statement::Insert { .. } => "insert",
        Statement::Delete { .. } => "delete",
        Statement::Update { .. } => "update",
        Statement::Select { .. } => "select",
    }
}
