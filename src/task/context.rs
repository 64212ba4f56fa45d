// src/task/context.rs

//! Execution context handed to each task's `run`.

use tokio::sync::watch;
use tracing::debug;

use crate::logs::ChannelWriter;

/// Capabilities available to a running task.
///
/// The log sink is an explicit optional field rather than ambient state: a
/// task can stream progress without knowing whether anyone is listening,
/// and absence of a sink turns every log call into a no-op instead of an
/// error.
///
/// Cancellation is advisory. The runner never interrupts an in-flight
/// `run`; a long-running task that wants to stop early polls
/// [`TaskContext::is_cancelled`] at its own suspension points.
#[derive(Debug, Clone, Default)]
pub struct TaskContext {
    sink: Option<ChannelWriter>,
    cancel: Option<watch::Receiver<bool>>,
}

impl TaskContext {
    /// Context with no sink and no cancel signal. Logging is a no-op.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose log calls stream into `sink`.
    pub fn with_sink(sink: ChannelWriter) -> Self {
        Self {
            sink: Some(sink),
            cancel: None,
        }
    }

    /// Attach a cancellation signal.
    pub fn with_cancel(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The attached sink, if any.
    pub fn sink(&self) -> Option<&ChannelWriter> {
        self.sink.as_ref()
    }

    /// Close the attached sink so its reader observes end-of-stream.
    ///
    /// Idempotent; a context without a sink is a no-op.
    pub fn close_sink(&self) {
        if let Some(sink) = &self.sink {
            let _ = sink.close();
        }
    }

    /// Whether cancellation has been requested.
    ///
    /// Always `false` when no cancel signal is attached.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Stream a progress message to the sink, if one is attached.
    ///
    /// A trailing newline is appended only if `msg` does not already end in
    /// one. With no sink attached the message is silently discarded; a
    /// write to an already-closed sink is swallowed with a debug trace,
    /// since tasks may race their final log calls against the runner
    /// closing the sink.
    pub fn log(&self, msg: &str) {
        let Some(sink) = &self.sink else {
            return;
        };

        let res = if msg.ends_with('\n') {
            sink.write(msg.as_bytes())
        } else {
            let mut line = String::with_capacity(msg.len() + 1);
            line.push_str(msg);
            line.push('\n');
            sink.write(line.as_bytes())
        };

        if let Err(e) = res {
            debug!(error = %e, "dropping task log message");
        }
    }
}
