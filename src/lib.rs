// src/lib.rs

pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod logs;
pub mod task;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::ConfigFile;
use crate::engine::{CompletionEvent, Driver, RunReport};
use crate::exec::Executor;
use crate::task::Task;

/// High-level entry point: run an ordered task list to completion.
///
/// This wires together:
/// - the sequential executor over `tasks`
/// - one log sink per task, drained concurrently with the run
/// - the coordinator that joins each task's result with its log stream
///
/// Completion events are delivered to `completions` as each task fully
/// finishes (result and log stream both done); the presentation layer
/// renders them, or the receiver can simply be dropped if nobody cares.
pub async fn run_tasks(
    tasks: Vec<Arc<dyn Task>>,
    config: &ConfigFile,
    completions: mpsc::Sender<CompletionEvent>,
) -> Result<RunReport> {
    info!(total = tasks.len(), "starting task run");

    let executor = Executor::new(tasks);
    let driver = Driver::new(executor, config.runner_options());

    let report = driver.run(completions).await?;
    Ok(report)
}
