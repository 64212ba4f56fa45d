#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::time::sleep;

use runlist::task::{Task, TaskContext, TaskResult};

/// Scripted task for tests: streams a fixed set of lines, optionally waits,
/// then returns a fixed result.
pub struct ScriptedTask {
    name: String,
    lines: Vec<String>,
    result: TaskResult,
    delay: Option<Duration>,
    close_sink_early: bool,
}

impl ScriptedTask {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: Vec::new(),
            result: TaskResult::done(),
            delay: None,
            close_sink_early: false,
        }
    }

    /// Add a line the task will stream while running.
    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Set the result the task will return.
    pub fn result(mut self, result: TaskResult) -> Self {
        self.result = result;
        self
    }

    /// Sleep for `delay` after streaming lines, before returning.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Close the sink right after streaming, before the task itself
    /// finishes. Forces the "logs done before result" signal ordering.
    pub fn close_sink_early(mut self) -> Self {
        self.close_sink_early = true;
        self
    }

    pub fn into_arc(self) -> Arc<dyn Task> {
        Arc::new(self)
    }
}

#[async_trait]
impl Task for ScriptedTask {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: &TaskContext) -> TaskResult {
        for line in &self.lines {
            ctx.log(line);
        }

        if self.close_sink_early {
            ctx.close_sink();
        }

        if let Some(delay) = self.delay {
            sleep(delay).await;
        }

        self.result.clone()
    }
}

/// Task that streams its lines and then blocks until the test releases it.
///
/// Used to control exactly when the "run finished" signal fires relative to
/// the log stream draining.
pub struct GatedTask {
    name: String,
    lines: Vec<String>,
    result: TaskResult,
    gate: Arc<Notify>,
}

impl GatedTask {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: Vec::new(),
            result: TaskResult::done(),
            gate: Arc::new(Notify::new()),
        }
    }

    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn result(mut self, result: TaskResult) -> Self {
        self.result = result;
        self
    }

    /// Handle the test uses to let the task finish.
    pub fn gate(&self) -> Arc<Notify> {
        Arc::clone(&self.gate)
    }

    pub fn into_arc(self) -> Arc<dyn Task> {
        Arc::new(self)
    }
}

#[async_trait]
impl Task for GatedTask {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: &TaskContext) -> TaskResult {
        for line in &self.lines {
            ctx.log(line);
        }

        self.gate.notified().await;
        self.result.clone()
    }
}
