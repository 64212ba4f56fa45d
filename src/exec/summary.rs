// src/exec/summary.rs

//! Aggregate view over the executor's result slots.

use crate::task::{TaskResult, TaskStatus};

/// Counts of task results by status.
///
/// A pure read-only projection of executor state; cheap to recompute and
/// safe to poll repeatedly from display code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub done: usize,
    pub skipped: usize,
    pub failed: usize,
    pub pending: usize,
    pub has_failures: bool,
}

impl Summary {
    pub fn from_results(results: &[TaskResult]) -> Self {
        let mut summary = Summary::default();

        for result in results {
            match result.status {
                TaskStatus::Done => summary.done += 1,
                TaskStatus::Skipped => summary.skipped += 1,
                TaskStatus::Failed => summary.failed += 1,
                // A slot still marked Running counts as pending here: the
                // run has not produced its terminal result yet.
                TaskStatus::Pending | TaskStatus::Running => summary.pending += 1,
            }
        }

        summary.has_failures = summary.failed > 0;
        summary
    }
}
