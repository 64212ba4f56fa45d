// src/task/result.rs

//! Task outcome types.

use std::time::Duration;

/// Status of a task slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Not yet run.
    Pending,
    /// Currently executing.
    Running,
    /// Completed successfully.
    Done,
    /// Deliberately not executed (see `message` for the reason).
    Skipped,
    /// Completed with an error.
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Skipped | TaskStatus::Failed)
    }
}

/// Outcome of running a single task.
///
/// Failure is ordinary data here: a failing task produces a `TaskResult`
/// with [`TaskStatus::Failed`] and the error rendered into `error`, it does
/// not propagate an `Err` through the executor.
///
/// Invariant: a `Pending` result has a zero `duration` and no `error`.
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub status: TaskStatus,
    /// Free-form note, e.g. a skip reason.
    pub message: String,
    /// Captured buffered output, independent of the streamed log lines.
    pub output: String,
    /// Display form of the task's error, if it failed.
    pub error: Option<String>,
    /// Wall-clock time of the `run` call. Filled in by the executor.
    pub duration: Duration,
}

impl TaskResult {
    pub fn pending() -> Self {
        Self {
            status: TaskStatus::Pending,
            message: String::new(),
            output: String::new(),
            error: None,
            duration: Duration::ZERO,
        }
    }

    pub fn running() -> Self {
        Self {
            status: TaskStatus::Running,
            ..Self::pending()
        }
    }

    pub fn done() -> Self {
        Self {
            status: TaskStatus::Done,
            ..Self::pending()
        }
    }

    pub fn done_with_output(output: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::Done,
            output: output.into(),
            ..Self::pending()
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::Skipped,
            message: reason.into(),
            ..Self::pending()
        }
    }

    pub fn failed(err: anyhow::Error) -> Self {
        Self {
            status: TaskStatus::Failed,
            error: Some(err.to_string()),
            ..Self::pending()
        }
    }

    /// Attach the measured wall-clock duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl Default for TaskResult {
    fn default() -> Self {
        Self::pending()
    }
}
