// src/engine/driver.rs

//! Async shell that drives the executor and coordinator per task.
//!
//! For each task the driver wires three parties together:
//!
//! - the executor's `run_next`, spawned on its own tokio task so the
//!   dispatcher can keep receiving while the task runs;
//! - a line pump that forwards the task's streamed lines from the sink
//!   channel into the dispatcher;
//! - the coordinator, fed from the single dispatcher loop below, which
//!   decides when both completion signals have arrived.
//!
//! The executor moves into the spawned run and is handed back through the
//! join handle, so its single-owner mutation rule is enforced by ownership
//! rather than by convention.

use anyhow::anyhow;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::engine::{CompletionEvent, Coordinator, RunReport, RunnerOptions, TaskSignal};
use crate::errors::{Result, RunlistError};
use crate::exec::Executor;
use crate::logs::ChannelWriter;
use crate::task::{TaskContext, TaskStatus};

/// Sequentially runs every task in the executor, emitting one
/// [`CompletionEvent`] per task once its result *and* its log stream have
/// both finished.
#[derive(Debug)]
pub struct Driver {
    executor: Executor,
    coordinator: Coordinator,
    options: RunnerOptions,
    cancel: Option<watch::Receiver<bool>>,
}

impl Driver {
    pub fn new(executor: Executor, options: RunnerOptions) -> Self {
        Self {
            executor,
            coordinator: Coordinator::new(),
            options,
            cancel: None,
        }
    }

    /// Attach a cancellation signal that is handed to every task's context.
    ///
    /// The driver itself never enforces it; tasks observe it at their own
    /// suspension points.
    pub fn with_cancel(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Run all tasks to completion (or until an abort).
    ///
    /// Completion events are sent to `completions` as they finalize; a
    /// dropped receiver is tolerated, the run continues without a consumer.
    /// When `halt_on_failure` is set, a `Failed` result aborts the executor
    /// before the next task starts.
    pub async fn run(self, completions: mpsc::Sender<CompletionEvent>) -> Result<RunReport> {
        let Self {
            mut executor,
            mut coordinator,
            options,
            cancel,
        } = self;

        info!(total = executor.total(), "runlist driver started");

        while !executor.stopped() {
            let index = executor.current();
            let (returned, event) =
                run_one(executor, &mut coordinator, &options, cancel.clone(), index).await?;
            executor = returned;

            let failed = event.result.status == TaskStatus::Failed;

            if completions.send(event).await.is_err() {
                debug!(index, "completion receiver gone; continuing without consumer");
            }

            if failed && options.halt_on_failure {
                executor.abort();
            }
        }

        let summary = executor.summary();
        info!(
            done = summary.done,
            skipped = summary.skipped,
            failed = summary.failed,
            pending = summary.pending,
            aborted = executor.aborted(),
            "driver finished"
        );

        Ok(RunReport {
            results: executor.results().to_vec(),
            summary,
            elapsed: executor.elapsed(),
            aborted: executor.aborted(),
        })
    }
}

/// Run a single task cycle: start the coordinator cycle, spawn the run and
/// the line pump, then dispatch signals until the cycle finalizes.
async fn run_one(
    mut executor: Executor,
    coordinator: &mut Coordinator,
    options: &RunnerOptions,
    cancel: Option<watch::Receiver<bool>>,
    index: usize,
) -> Result<(Executor, CompletionEvent)> {
    coordinator.start_task(index);

    let (writer, lines_rx) = ChannelWriter::new(options.log_capacity);
    let mut ctx = TaskContext::with_sink(writer);
    if let Some(rx) = cancel {
        ctx = ctx.with_cancel(rx);
    }

    let (signal_tx, mut signal_rx) = mpsc::channel::<TaskSignal>(64);

    spawn_line_pump(lines_rx, signal_tx.clone());

    let run_tx = signal_tx.clone();
    let run_handle: JoinHandle<Executor> = tokio::spawn(async move {
        let result = executor.run_next(&ctx).await;

        // Close the sink so the line pump observes end-of-stream even when
        // the task never wrote a byte.
        ctx.close_sink();

        if let Some(result) = result {
            let _ = run_tx.send(TaskSignal::Finished(result)).await;
        }
        executor
    });

    // Only the pump and the run task hold senders now; the dispatcher loop
    // below ends when both are gone.
    drop(signal_tx);

    let mut completion = None;
    while let Some(signal) = signal_rx.recv().await {
        match signal {
            TaskSignal::LogLine(line) => coordinator.add_log_line(line),
            TaskSignal::LogsClosed => {
                if let Some(event) = coordinator.logs_done() {
                    completion = Some(event);
                    break;
                }
            }
            TaskSignal::Finished(result) => {
                if let Some(event) = coordinator.task_done(result) {
                    completion = Some(event);
                    break;
                }
            }
        }
    }

    let executor = run_handle
        .await
        .map_err(|e| RunlistError::Other(anyhow!("task runner panicked: {e}")))?;

    let event = completion.ok_or_else(|| {
        RunlistError::Other(anyhow!(
            "task cycle for index {index} ended without both completion signals"
        ))
    })?;

    Ok((executor, event))
}

/// Forward streamed lines into the dispatcher, then announce end-of-stream.
fn spawn_line_pump(
    mut lines: mpsc::Receiver<String>,
    signals: mpsc::Sender<TaskSignal>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(line) = lines.recv().await {
            if signals.send(TaskSignal::LogLine(line)).await.is_err() {
                // Dispatcher gone; nobody left to deliver to.
                return;
            }
        }
        let _ = signals.send(TaskSignal::LogsClosed).await;
    })
}
