//! Structured outcome of a sync run.

use serde::Serialize;

use ownersync_core::SyncTarget;

/// Terminal state of one scheduled unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UnitOutcome {
    Succeeded,
    Failed { target: SyncTarget, error: String },
    Skipped,
}

/// Placeholder target for a unit whose task could not be joined.
pub const UNKNOWN_TARGET: &str = "<unknown>";

/// A target whose sync call returned an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetFailure {
    pub target: String,
    pub error: String,
}

/// Counts of every scheduled unit by terminal state.
///
/// `scheduled == succeeded + failed + skipped` once the run has finished, and
/// every failed unit has exactly one entry in `failures`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub scheduled: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub failures: Vec<TargetFailure>,
}

impl RunReport {
    pub(crate) fn record(&mut self, outcome: UnitOutcome) {
        match outcome {
            UnitOutcome::Succeeded => self.succeeded += 1,
            UnitOutcome::Skipped => self.skipped += 1,
            UnitOutcome::Failed { target, error } => {
                self.failed += 1;
                self.failures.push(TargetFailure {
                    target: target.to_string(),
                    error,
                });
            }
        }
    }

    /// A unit task that panicked or was aborted. Its target is no longer
    /// known, so the failure is recorded under [`UNKNOWN_TARGET`].
    pub(crate) fn record_join_failure(&mut self, error: String) {
        self.failed += 1;
        self.failures.push(TargetFailure {
            target: UNKNOWN_TARGET.to_string(),
            error,
        });
    }

    /// Units that reached a terminal state.
    pub fn finished(&self) -> usize {
        self.succeeded + self.failed + self.skipped
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}
