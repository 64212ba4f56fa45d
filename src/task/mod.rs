// src/task/mod.rs

//! Task abstraction and per-task result types.
//!
//! - [`result`] defines [`TaskStatus`] and [`TaskResult`], the data form in
//!   which task outcomes travel through the crate.
//! - [`context`] defines [`TaskContext`], the explicit capability bag handed
//!   to each task's `run` (optional log sink, optional cancellation).

use async_trait::async_trait;

pub mod context;
pub mod result;

pub use context::TaskContext;
pub use result::{TaskResult, TaskStatus};

/// A named unit of work, invoked exactly once by the executor.
///
/// Implementations report failure as data: `run` returns a [`TaskResult`]
/// with [`TaskStatus::Failed`] rather than an `Err`. A task that wants to
/// stream progress writes to the sink carried by the [`TaskContext`]; a task
/// that wants to be cancellable must itself observe the context's cancel
/// signal.
#[async_trait]
pub trait Task: Send + Sync {
    /// Display name of this task.
    fn name(&self) -> &str;

    /// Execute the task. Called at most once.
    async fn run(&self, ctx: &TaskContext) -> TaskResult;
}

impl std::fmt::Debug for dyn Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").field("name", &self.name()).finish()
    }
}
