//! Index selection.
//!
//! Matches the conditions attached to a table scan against the table's
//! indexes and picks the one with the longest constrained leading prefix.
//! Index matching is purely structural: all point predicates, no
//! reordering of the WHERE clause, no statistics.

use std::collections::HashMap;

use crate::ast::Condition;
use crate::catalog::TableMeta;

/// Index selector.
///
/// Walks each index's key columns in declared order and counts how many
/// leading columns are constrained by an eligible predicate, stopping at
/// the first gap. The index with the highest count wins; the first index
/// in declaration order wins ties, and an index whose entire column list
/// is constrained short-circuits the search.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexSelector {}

impl IndexSelector {
    /// Creates a new index selector.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Picks the best index on `table` for the given condition pool.
    ///
    /// Eligible conditions are those whose left column belongs to the
    /// table and whose right-hand side is a literal. Returns the winning
    /// index's complete key-column list, or `None` when no index has a
    /// constrained leading column.
    ///
    /// Note the full column list is returned even when only a proper
    /// prefix is constrained: the scan records the index's identity, and
    /// the scan operator restricts its probe to the constrained prefix.
    #[must_use]
    pub fn best_index(&self, table: &TableMeta, conds: &[Condition]) -> Option<Vec<String>> {
        let mut constrained: HashMap<&str, &Condition> = HashMap::new();
        for cond in conds {
            if cond.has_literal_rhs() && cond.lhs.table == table.name {
                constrained.insert(cond.lhs.column.as_str(), cond);
            }
        }
        self.best_prefix(table, |col| constrained.contains_key(col))
    }

    /// Picks the best index on `table` whose leading column is `column`.
    ///
    /// Used when a join key arrives at a table whose per-table predicates
    /// did not select an index: the key alone may still admit an index
    /// scan.
    #[must_use]
    pub fn best_index_for_column(&self, table: &TableMeta, column: &str) -> Option<Vec<String>> {
        self.best_prefix(table, |col| col == column)
    }

    /// Shared prefix walk over the table's indexes.
    fn best_prefix(
        &self,
        table: &TableMeta,
        is_constrained: impl Fn(&str) -> bool,
    ) -> Option<Vec<String>> {
        let mut max_count = 0usize;
        let mut best: Option<&[String]> = None;

        for index in &table.indexes {
            let mut count = 0usize;
            let mut full_match = true;
            for col in &index.columns {
                if is_constrained(col) {
                    count += 1;
                } else {
                    full_match = false;
                    break;
                }
            }

            if count > max_count {
                max_count = count;
                best = Some(&index.columns);
                if full_match {
                    return Some(index.columns.clone());
                }
            }
        }

        best.map(<[String]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IndexMeta;

    fn table_with(indexes: Vec<IndexMeta>) -> TableMeta {
        let mut table = TableMeta::new("t");
        for index in indexes {
            table = table.with_index(index);
        }
        table
    }

    #[test]
    fn no_index_no_match() {
        let selector = IndexSelector::new();
        let table = table_with(vec![]);
        let conds = vec![Condition::eq_value("t", "a", 1i64)];
        assert_eq!(selector.best_index(&table, &conds), None);
    }

    #[test]
    fn single_column_full_match() {
        let selector = IndexSelector::new();
        let table = table_with(vec![IndexMeta::new("t_a", vec!["a"])]);
        let conds = vec![Condition::eq_value("t", "a", 5i64)];
        assert_eq!(selector.best_index(&table, &conds), Some(vec!["a".to_string()]));
    }

    #[test]
    fn unconstrained_leading_column_misses() {
        let selector = IndexSelector::new();
        let table = table_with(vec![IndexMeta::new("t_a_b", vec!["a", "b"])]);
        // Only the second index column is constrained; the prefix walk
        // stops at the first gap.
        let conds = vec![Condition::eq_value("t", "b", 5i64)];
        assert_eq!(selector.best_index(&table, &conds), None);
    }

    #[test]
    fn partial_prefix_returns_full_column_list() {
        let selector = IndexSelector::new();
        let table = table_with(vec![IndexMeta::new("t_a_b_c", vec!["a", "b", "c"])]);
        let conds = vec![
            Condition::eq_value("t", "a", 1i64),
            Condition::eq_value("t", "b", 2i64),
        ];
        // Index identity, not prefix length: all three columns come back.
        assert_eq!(
            selector.best_index(&table, &conds),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn longest_prefix_wins() {
        let selector = IndexSelector::new();
        let table = table_with(vec![
            IndexMeta::new("t_c_a", vec!["c", "a"]),
            IndexMeta::new("t_a_b", vec!["a", "b"]),
        ]);
        let conds = vec![
            Condition::eq_value("t", "a", 1i64),
            Condition::eq_value("t", "b", 2i64),
        ];
        // c,a matches nothing on its lead; a,b matches both columns.
        assert_eq!(
            selector.best_index(&table, &conds),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn declaration_order_breaks_ties() {
        let selector = IndexSelector::new();
        let table = table_with(vec![
            IndexMeta::new("t_a_x", vec!["a", "x"]),
            IndexMeta::new("t_a_y", vec!["a", "y"]),
        ]);
        let conds = vec![Condition::eq_value("t", "a", 1i64)];
        assert_eq!(
            selector.best_index(&table, &conds),
            Some(vec!["a".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn inter_column_and_foreign_conditions_are_ineligible() {
        let selector = IndexSelector::new();
        let table = table_with(vec![IndexMeta::new("t_a", vec!["a"])]);
        let conds = vec![
            // Not a literal rhs.
            Condition::eq_columns(
                stratadb_core::ColumnRef::new("t", "a"),
                stratadb_core::ColumnRef::new("u", "c"),
            ),
            // Wrong table.
            Condition::eq_value("u", "a", 1i64),
        ];
        assert_eq!(selector.best_index(&table, &conds), None);
    }

    #[test]
    fn join_key_probe_matches_leading_column_only() {
        let selector = IndexSelector::new();
        let table = table_with(vec![
            IndexMeta::new("t_b_a", vec!["b", "a"]),
            IndexMeta::new("t_a_b", vec!["a", "b"]),
        ]);
        assert_eq!(
            selector.best_index_for_column(&table, "a"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(selector.best_index_for_column(&table, "c"), None);
    }
}
