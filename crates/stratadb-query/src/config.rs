//! Planner configuration and the process-wide join knobs.
//!
//! Two administrative switches govern which join algorithm the planner
//! may emit: `ENABLE_NESTLOOP` and `ENABLE_SORTMERGE`. They are mutated
//! by the session layer on `SET ENABLE_NESTLOOP = ...` /
//! `SET ENABLE_SORTMERGE = ...` and read by the planner as a single
//! [`PlanConfig`] snapshot per planned statement.

use std::sync::atomic::{AtomicBool, Ordering};

static ENABLE_NESTLOOP: AtomicBool = AtomicBool::new(true);
static ENABLE_SORTMERGE: AtomicBool = AtomicBool::new(true);

/// Enables or disables the nested-loop join executor process-wide.
pub fn set_enable_nestedloop_join(enabled: bool) {
    ENABLE_NESTLOOP.store(enabled, Ordering::Relaxed);
}

/// Enables or disables the sort-merge join executor process-wide.
pub fn set_enable_sortmerge_join(enabled: bool) {
    ENABLE_SORTMERGE.store(enabled, Ordering::Relaxed);
}

/// A snapshot of the planner knobs.
///
/// The planner reads the knobs once per statement; a concurrent `SET`
/// during planning can at worst split the two loads, which the join
/// selection matrix tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanConfig {
    /// Whether nested-loop join may be emitted.
    pub enable_nestloop: bool,
    /// Whether sort-merge join may be emitted.
    pub enable_sortmerge: bool,
}

impl PlanConfig {
    /// Creates a config with both join executors enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self { enable_nestloop: true, enable_sortmerge: true }
    }

    /// Snapshots the current process-wide knob values.
    #[must_use]
    pub fn current() -> Self {
        Self {
            enable_nestloop: ENABLE_NESTLOOP.load(Ordering::Relaxed),
            enable_sortmerge: ENABLE_SORTMERGE.load(Ordering::Relaxed),
        }
    }

    /// Sets the nested-loop knob on this snapshot.
    #[must_use]
    pub const fn with_nestloop(mut self, enabled: bool) -> Self {
        self.enable_nestloop = enabled;
        self
    }

    /// Sets the sort-merge knob on this snapshot.
    #[must_use]
    pub const fn with_sortmerge(mut self, enabled: bool) -> Self {
        self.enable_sortmerge = enabled;
        self
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_both() {
        let config = PlanConfig::new();
        assert!(config.enable_nestloop);
        assert!(config.enable_sortmerge);
    }

    #[test]
    fn builders_override() {
        let config = PlanConfig::new().with_nestloop(false).with_sortmerge(true);
        assert!(!config.enable_nestloop);
        assert!(config.enable_sortmerge);
    }

    // The one test that touches the process-wide knobs; restores them so
    // other tests observing `PlanConfig::current()` stay unaffected.
    #[test]
    fn global_knobs_round_trip() {
        set_enable_nestedloop_join(false);
        set_enable_sortmerge_join(false);
        let snapshot = PlanConfig::current();
        assert!(!snapshot.enable_nestloop);
        assert!(!snapshot.enable_sortmerge);

        set_enable_nestedloop_join(true);
        set_enable_sortmerge_join(true);
        let restored = PlanConfig::current();
        assert!(restored.enable_nestloop);
        assert!(restored.enable_sortmerge);
    }
}
