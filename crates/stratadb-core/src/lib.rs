//! StrataDB Core
//!
//! This crate provides the fundamental types shared across the StrataDB
//! engine: typed scalar values, table-qualified column references, and
//! column schema descriptors.
//!
//! # Overview
//!
//! - **Values**: [`Value`] enum covering the storable scalar types
//!   (integers, floats, fixed-width character strings)
//! - **Columns**: [`ColumnRef`] for unambiguous `table.column` references,
//!   [`ColumnType`] and [`ColumnDef`] for schema declarations
//!
//! # Example
//!
//! ```
//! use stratadb_core::{ColumnRef, Value};
//!
//! // Create values via From
//! let id: Value = 42i64.into();
//! let score: Value = 95.5f64.into();
//! let name: Value = "Alice".into();
//!
//! assert_eq!(id.as_int(), Some(42));
//! assert_eq!(score.as_float(), Some(95.5));
//! assert_eq!(name.as_str(), Some("Alice"));
//!
//! // Qualified column references compare field-wise
//! let a = ColumnRef::new("users", "id");
//! let b = ColumnRef::new("users", "id");
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "users.id");
//! ```
//!
//! # Modules
//!
//! - [`types`] - Core data types ([`Value`], [`ColumnRef`], [`ColumnDef`])
//! - [`error`] - Error types ([`CoreError`])

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{ColumnDef, ColumnRef, ColumnType, Value};
