// src/logs/writer.rs

//! Line-buffering concurrent log sink.
//!
//! [`ChannelWriter`] converts an arbitrary byte stream into a sequence of
//! discrete lines delivered over a bounded `mpsc` channel. Delivery is
//! non-blocking with a drop-newest overflow policy: if the consumer falls
//! behind and the channel fills up, new lines are discarded rather than
//! stalling the producing task. This trades completeness of the streamed
//! view for producer liveness; the full buffered output of a task still
//! travels in its `TaskResult`.

use std::io;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::{Result, RunlistError};

/// Channel capacity used when the caller passes `0`.
pub const DEFAULT_LINE_CAPACITY: usize = 100;

#[derive(Debug)]
struct Inner {
    /// Incomplete line fragment (no newline seen yet).
    buf: Vec<u8>,
    /// Dropped on close so the receiver observes end-of-stream.
    tx: Option<mpsc::Sender<String>>,
    closed: bool,
}

/// Concurrency-safe writer that emits complete lines onto a bounded channel.
///
/// Clones share the same buffer, channel and `closed` flag, so a task and
/// the runner can each hold a handle. All state transitions happen under a
/// single mutex; nothing awaits while it is held.
#[derive(Debug, Clone)]
pub struct ChannelWriter {
    inner: Arc<Mutex<Inner>>,
}

impl ChannelWriter {
    /// Create a writer and the read-only end of its line channel.
    ///
    /// A `capacity` of `0` is replaced by [`DEFAULT_LINE_CAPACITY`].
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let capacity = if capacity == 0 {
            DEFAULT_LINE_CAPACITY
        } else {
            capacity
        };

        let (tx, rx) = mpsc::channel(capacity);
        let writer = Self {
            inner: Arc::new(Mutex::new(Inner {
                buf: Vec::new(),
                tx: Some(tx),
                closed: false,
            })),
        };

        (writer, rx)
    }

    /// Append bytes, emitting every complete line onto the channel.
    ///
    /// Lines are the text up to and including each `\n`, with the delimiter
    /// stripped. Returns [`RunlistError::SinkClosed`] after [`close`] without
    /// touching the buffer.
    ///
    /// [`close`]: ChannelWriter::close
    pub fn write(&self, bytes: &[u8]) -> Result<usize> {
        let mut inner = self.inner.lock().expect("log sink mutex poisoned");

        if inner.closed {
            return Err(RunlistError::SinkClosed);
        }

        inner.buf.extend_from_slice(bytes);

        while let Some(pos) = inner.buf.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = inner.buf.drain(..=pos).collect();
            line.pop(); // strip '\n'
            emit_line(&inner.tx, line);
        }

        Ok(bytes.len())
    }

    /// Close the sink.
    ///
    /// Idempotent: the second and further calls are no-ops. On first call
    /// any buffered fragment (a final line with no trailing newline) is
    /// emitted, then the sender is dropped so a reader draining the channel
    /// eventually sees end-of-stream.
    pub fn close(&self) -> Result<()> {
        let mut inner = self.inner.lock().expect("log sink mutex poisoned");

        if inner.closed {
            return Ok(());
        }
        inner.closed = true;

        if !inner.buf.is_empty() {
            let line = std::mem::take(&mut inner.buf);
            emit_line(&inner.tx, line);
        }

        inner.tx = None;
        Ok(())
    }

    /// Whether [`close`](ChannelWriter::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.lock().expect("log sink mutex poisoned").closed
    }
}

/// Non-blocking send. A full channel drops the line (drop-newest policy).
fn emit_line(tx: &Option<mpsc::Sender<String>>, line: Vec<u8>) {
    let Some(tx) = tx else {
        return;
    };

    let text = String::from_utf8_lossy(&line).into_owned();
    if let Err(e) = tx.try_send(text) {
        debug!(error = %e, "log line channel full or gone; dropping line");
    }
}

impl io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ChannelWriter::write(self, buf).map_err(|e| match e {
            RunlistError::SinkClosed => io::Error::new(io::ErrorKind::BrokenPipe, e),
            other => io::Error::other(other),
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        // Complete lines are forwarded eagerly; the trailing fragment is
        // only flushed by `close`, where it becomes the final line.
        Ok(())
    }
}
