//! Predicate routing.
//!
//! Splits the bound query's flat condition pool across the plan tree:
//! single-table predicates are drained into scans ([`pop_conds`]), and
//! residual inter-table predicates are walked down an existing join tree
//! to the shallowest join covering both referenced tables
//! ([`push_condition`]).

use crate::ast::Condition;
use crate::plan::physical::Plan;

/// Removes and returns every condition consumable by a scan of `table`:
/// single-table predicates on the table with a literal right-hand side,
/// plus degenerate predicates whose two column sides name the same table.
/// The relative order of the remaining conditions is preserved.
pub fn pop_conds(pool: &mut Vec<Condition>, table: &str) -> Vec<Condition> {
    let mut extracted = Vec::new();
    let mut i = 0;
    while i < pool.len() {
        let cond = &pool[i];
        let single_table = cond.has_literal_rhs() && cond.lhs.table == table;
        let degenerate = cond.rhs_column().is_some_and(|rhs| rhs.table == cond.lhs.table);
        if single_table || degenerate {
            extracted.push(pool.remove(i));
        } else {
            i += 1;
        }
    }
    extracted
}

/// Where a pushed condition landed relative to a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushDown {
    /// The condition was attached to a join inside the subtree.
    Placed,
    /// Only the condition's left column's table is inside the subtree.
    Lhs,
    /// Only the condition's right column's table is inside the subtree.
    Rhs,
    /// Neither referenced table is inside the subtree.
    Absent,
}

/// Pushes a residual inter-table condition into an existing plan tree.
///
/// The condition attaches to the lowest join whose subtree contains both
/// referenced tables. When the left subtree holds the condition's
/// right-side table, the condition is mirror-swapped first so its left
/// column always refers into the left subtree.
///
/// The slot is taken (`None`) exactly when the result is
/// [`PushDown::Placed`]; any other result leaves the condition in place
/// for the caller.
pub fn push_condition(plan: &mut Plan, slot: &mut Option<Condition>) -> PushDown {
    let Some(cond) = slot.as_ref() else {
        return PushDown::Placed;
    };

    match plan {
        Plan::SeqScan(_) | Plan::IndexScan(_) => {
            // Scans never absorb a residual condition; they only report
            // which side of it they cover.
            let table = plan.scan_table().unwrap_or_default();
            if cond.lhs.table == table {
                PushDown::Lhs
            } else if cond.rhs_column().is_some_and(|rhs| rhs.table == table) {
                PushDown::Rhs
            } else {
                PushDown::Absent
            }
        }
        Plan::NestedLoopJoin { node, left, right } | Plan::MergeJoin { node, left, right } => {
            let left_res = push_condition(left, slot);
            if left_res == PushDown::Placed {
                return PushDown::Placed;
            }
            let right_res = push_condition(right, slot);
            if right_res == PushDown::Placed {
                return PushDown::Placed;
            }
            // The predicate straddles tables outside this subtree; report
            // the side (if any) that is covered so an ancestor can place it.
            if left_res == PushDown::Absent {
                return right_res;
            }
            if right_res == PushDown::Absent {
                return left_res;
            }
            // Both sides are covered here: this join is the shallowest
            // node spanning them.
            let mut cond = match slot.take() {
                Some(cond) => cond,
                None => return PushDown::Placed,
            };
            if left_res == PushDown::Rhs {
                cond.mirror_swap();
            }
            node.conds.push(cond);
            PushDown::Placed
        }
        // Sort wrappers and statement roots do not cover any table.
        _ => PushDown::Absent,
    }
}
