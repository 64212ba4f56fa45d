// src/engine/coordinator.rs

//! Pure completion-join state machine.
//!
//! For every task the engine waits on two signals that can arrive in either
//! order: the task's `run` returning a result, and the task's log channel
//! draining to end-of-stream. The [`Coordinator`] consumes both (plus the
//! log lines themselves) and produces exactly one [`CompletionEvent`] per
//! cycle, no matter which signal lands first.
//!
//! The coordinator is intentionally synchronous and channel-free so the
//! reconciliation logic can be unit tested without Tokio. The async shell
//! in [`driver`](crate::engine::driver) owns one instance and feeds it from
//! a single dispatcher loop.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::engine::CompletionEvent;
use crate::task::TaskResult;

/// Where the current cycle stands between the two completion signals.
///
/// An explicit tagged state instead of a pair of flags: every transition in
/// `task_done` / `logs_done` is one arm of a match over this enum.
#[derive(Debug)]
enum CycleState {
    /// Neither signal has arrived.
    AwaitingBoth,
    /// The result arrived first; logs are still draining.
    ResultFirst(TaskResult),
    /// The log stream finished first; the run is still going.
    LogsFirst,
    /// The cycle has produced its completion event.
    Finalized,
}

/// Reconciles "task result arrived" and "log stream finished" into one
/// completion event per task cycle.
#[derive(Debug)]
pub struct Coordinator {
    /// Index of the task under coordination.
    current_index: usize,
    /// Live line accumulator for the in-flight cycle.
    current_logs: Vec<String>,
    /// Finalized line sequences by task index. Empty sequences are not
    /// stored.
    history: HashMap<usize, Vec<String>>,
    state: CycleState,
}

impl Coordinator {
    pub fn new() -> Self {
        Self {
            current_index: 0,
            current_logs: Vec::new(),
            history: HashMap::new(),
            state: CycleState::AwaitingBoth,
        }
    }

    /// Begin a new coordination cycle for task `index`.
    ///
    /// Resets the per-cycle state; must not be called before the previous
    /// cycle finalized, or lines could be attributed to the wrong task.
    pub fn start_task(&mut self, index: usize) {
        debug!(index, "coordinator: starting task cycle");
        self.current_index = index;
        self.current_logs.clear();
        self.state = CycleState::AwaitingBoth;
    }

    /// Index of the task currently under coordination.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Append a streamed line to the in-flight cycle.
    ///
    /// Valid at any point in the cycle — lines may still be draining from
    /// the channel after the task's result has already arrived.
    pub fn add_log_line(&mut self, line: String) {
        self.current_logs.push(line);
    }

    /// Mark the current task's log stream as fully drained.
    ///
    /// Finalizes immediately if the result already arrived; otherwise the
    /// cycle keeps waiting for it. A repeated call is a no-op.
    pub fn logs_done(&mut self) -> Option<CompletionEvent> {
        match self.state {
            CycleState::AwaitingBoth => {
                self.state = CycleState::LogsFirst;
                None
            }
            CycleState::ResultFirst(_) => {
                let CycleState::ResultFirst(result) =
                    std::mem::replace(&mut self.state, CycleState::Finalized)
                else {
                    unreachable!("state checked above");
                };
                Some(self.finalize(result))
            }
            CycleState::LogsFirst | CycleState::Finalized => None,
        }
    }

    /// Deliver the current task's result.
    ///
    /// Finalizes immediately if the log stream already finished; otherwise
    /// the result is parked until `logs_done`. A duplicate result for the
    /// same cycle is ignored — at most one finalization per cycle.
    pub fn task_done(&mut self, result: TaskResult) -> Option<CompletionEvent> {
        match self.state {
            CycleState::AwaitingBoth => {
                self.state = CycleState::ResultFirst(result);
                None
            }
            CycleState::LogsFirst => Some(self.finalize(result)),
            CycleState::ResultFirst(_) | CycleState::Finalized => {
                warn!(
                    index = self.current_index,
                    "duplicate task result for cycle; ignoring"
                );
                None
            }
        }
    }

    /// Historical log lines for a finalized task index.
    ///
    /// Tasks that streamed nothing have no history entry and yield an empty
    /// slice.
    pub fn logs_for(&self, index: usize) -> &[String] {
        self.history.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Live accumulator for the in-flight cycle.
    pub fn current_logs(&self) -> &[String] {
        &self.current_logs
    }

    fn finalize(&mut self, result: TaskResult) -> CompletionEvent {
        let logs = std::mem::take(&mut self.current_logs);
        if !logs.is_empty() {
            self.history.insert(self.current_index, logs.clone());
        }

        debug!(
            index = self.current_index,
            lines = logs.len(),
            status = ?result.status,
            "coordinator: task cycle complete"
        );

        self.state = CycleState::Finalized;
        CompletionEvent {
            task_index: self.current_index,
            result,
            logs,
        }
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}
