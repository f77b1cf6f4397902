//! StrataDB Query
//!
//! This crate turns bound SQL statements into physical plans for the
//! StrataDB execution engine.
//!
//! # Overview
//!
//! Parsing and name resolution happen upstream and deliver a
//! [`Query`](ast::Query): the statement kind plus flat, table-qualified
//! lists of conditions, projection columns, aggregates, and clauses. The
//! [`Planner`](plan::Planner) consumes it and emits a
//! [`Plan`](plan::Plan) tree:
//!
//! - DDL statements become leaf plans carrying their payload
//! - INSERT/DELETE/UPDATE become statement plans, the latter two over a
//!   single-table scan chosen by index matching
//! - SELECT runs the full pipeline: per-table scans with pushed-down
//!   predicates, a join tree assembled from the equi-join conditions,
//!   then group-by, sort, and projection caps
//!
//! # Example
//!
//! ```
//! use stratadb_core::ColumnDef;
//! use stratadb_query::ast::{Condition, Query};
//! use stratadb_query::catalog::{Catalog, IndexMeta, TableMeta};
//! use stratadb_query::plan::Planner;
//!
//! let catalog = Catalog::new().with_table(
//!     TableMeta::new("users")
//!         .with_column(ColumnDef::int("id"))
//!         .with_index(IndexMeta::new("users_id", vec!["id"])),
//! );
//!
//! let query = Query::select(vec!["users"])
//!     .with_conditions(vec![Condition::eq_value("users", "id", 1i64)]);
//!
//! let plan = Planner::new(catalog).plan_statement(query).unwrap();
//! assert!(plan.display_tree().contains("IndexScan"));
//! ```
//!
//! # Modules
//!
//! - [`ast`] - Bound statements and predicate expressions
//! - [`catalog`] - The catalog snapshot the planner reads
//! - [`plan`] - The plan tree and the planner
//! - [`config`] - Join-algorithm knobs
//! - [`error`] - Error types for planning

pub mod ast;
pub mod catalog;
pub mod config;
pub mod error;
pub mod plan;

// Re-export commonly used items at the crate root
pub use config::{set_enable_nestedloop_join, set_enable_sortmerge_join, PlanConfig};
pub use error::{PlanError, PlanResult};
pub use plan::{Plan, Planner};
