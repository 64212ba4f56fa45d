// src/exec/executor.rs

//! Sequential task executor.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::exec::Summary;
use crate::task::{Task, TaskContext, TaskResult};

/// Runs a fixed, ordered list of tasks one at a time and owns their results.
///
/// The executor is the single writer of its own state: `run_next` takes
/// `&mut self` and must be driven from one logical owner. It never decides
/// policy — a `Failed` result is recorded like any other, and stopping
/// early is the caller's call via [`abort`](Executor::abort).
#[derive(Debug)]
pub struct Executor {
    tasks: Vec<Arc<dyn Task>>,
    /// One slot per task, parallel to `tasks`. Initialised to `Pending`.
    results: Vec<TaskResult>,
    /// Index of the next task to run, in `[0, tasks.len()]`.
    current: usize,
    aborted: bool,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl Executor {
    pub fn new(tasks: Vec<Arc<dyn Task>>) -> Self {
        let results = tasks.iter().map(|_| TaskResult::pending()).collect();
        Self {
            tasks,
            results,
            current: 0,
            aborted: false,
            started_at: None,
            finished_at: None,
        }
    }

    /// Number of tasks. Constant for the executor's lifetime.
    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    /// Index of the next task to run.
    pub fn current(&self) -> usize {
        self.current
    }

    /// All tasks have run.
    pub fn done(&self) -> bool {
        self.current == self.tasks.len()
    }

    /// Finished, naturally or via [`abort`](Executor::abort).
    pub fn stopped(&self) -> bool {
        self.done() || self.aborted
    }

    /// Whether the run was aborted before completing.
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Stop the run: no further tasks will start.
    ///
    /// Idempotent. Does not interrupt a task already executing — it only
    /// prevents future `run_next` calls from doing anything.
    pub fn abort(&mut self) {
        if self.aborted {
            return;
        }
        self.aborted = true;
        if self.finished_at.is_none() {
            self.finished_at = Some(Instant::now());
        }
        warn!(current = self.current, total = self.total(), "run aborted");
    }

    /// Run the task at the cursor to completion and record its result.
    ///
    /// Returns `None` without side effects once [`stopped`](Executor::stopped)
    /// is true. The call blocks for the full duration of the task's `run`;
    /// callers wanting concurrency run it on a dedicated tokio task.
    pub async fn run_next(&mut self, ctx: &TaskContext) -> Option<TaskResult> {
        if self.stopped() {
            debug!(current = self.current, "run_next called on stopped executor");
            return None;
        }

        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }

        let index = self.current;
        let task = Arc::clone(&self.tasks[index]);
        info!(task = %task.name(), index, "starting task");

        self.results[index] = TaskResult::running();

        let started = Instant::now();
        let result = task.run(ctx).await.with_duration(started.elapsed());

        debug!(
            task = %task.name(),
            index,
            status = ?result.status,
            duration_ms = result.duration.as_millis() as u64,
            "task finished"
        );

        self.results[index] = result.clone();
        self.current += 1;

        if self.done() {
            self.finished_at = Some(Instant::now());
            info!(total = self.total(), "all tasks finished");
        }

        Some(result)
    }

    /// Result slot for task `index`.
    ///
    /// Out-of-range indices return a `Pending` placeholder instead of
    /// panicking, so read-side code stays branch-free.
    pub fn result_at(&self, index: usize) -> TaskResult {
        self.results
            .get(index)
            .cloned()
            .unwrap_or_else(TaskResult::pending)
    }

    /// Name of the task at `index`, if in range.
    pub fn task_name(&self, index: usize) -> Option<&str> {
        self.tasks.get(index).map(|t| t.name())
    }

    /// Counts of results by status over all slots.
    pub fn summary(&self) -> Summary {
        Summary::from_results(&self.results)
    }

    /// Wall-clock time of the run so far.
    ///
    /// Zero before the first task starts; frozen once the run stops;
    /// live otherwise.
    pub fn elapsed(&self) -> Duration {
        let Some(started) = self.started_at else {
            return Duration::ZERO;
        };

        match self.finished_at {
            Some(finished) => finished.duration_since(started),
            None => started.elapsed(),
        }
    }

    /// Snapshot of all result slots, in task order.
    pub fn results(&self) -> &[TaskResult] {
        &self.results
    }
}
