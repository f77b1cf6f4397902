//! Error types for query planning.

use thiserror::Error;

/// Errors that can occur during query planning.
///
/// The planner never recovers locally: every error aborts the statement
/// and surfaces to the caller. No partial plans are returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// An unreachable-by-contract situation, indicating an upstream bug:
    /// an AST root of unexpected shape, a non-column field under CREATE
    /// TABLE, a non-scan input reaching the merge-join sort wrap, or a
    /// bound query referencing a table the catalog does not know.
    #[error("internal error: {0}")]
    Internal(String),

    /// Both join knobs are disabled while the query requires a join.
    #[error("no join executor selected")]
    NoJoinExecutor,
}

impl PlanError {
    /// Creates an internal error with the given message.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlanError::internal("unexpected AST root");
        assert!(err.to_string().contains("internal error"));
        assert!(err.to_string().contains("unexpected AST root"));
        assert_eq!(PlanError::NoJoinExecutor.to_string(), "no join executor selected");
    }
}
