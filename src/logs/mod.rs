// src/logs/mod.rs

//! Line-oriented log streaming.
//!
//! - [`writer`] contains [`ChannelWriter`], the concurrency-safe adapter
//!   that turns raw byte writes into a bounded channel of discrete text
//!   lines.

pub mod writer;

pub use writer::{ChannelWriter, DEFAULT_LINE_CAPACITY};
