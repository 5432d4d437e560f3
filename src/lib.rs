//! # Rust Log Sink
//!
//! A minimal structured log sink. Entries (level, event, message, actor,
//! optional metadata) are optionally rendered to the console and handed to
//! a consumer through a bounded dispatch queue.
//!
//! ## Features
//!
//! - **Drain before close**: `shutdown` returns only after every submitted
//!   entry has been acknowledged by a consumer
//! - **Backpressure**: producers block while the queue is full, entries are never dropped
//! - **Thread Safe**: submit from any number of threads, read with any number of consumers
//! - **Console Output**: colorized `Label:"value"` rendering with live color settings

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ColorToken, ConsoleSettings, ConsoleWriter, JsonLinesConsumer};
    pub use crate::core::{
        consumer_fn, Ack, Consumer, Delivery, DispatchQueue, EntryFormat, EntryReceiver, LogEntry,
        LogLevel, LogSink, LogSinkBuilder, Metadata, Result, SinkConfig, SinkError, SinkMetrics,
        DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

pub use appenders::{ColorToken, ConsoleSettings, ConsoleWriter, JsonLinesConsumer};
pub use core::{
    consumer_fn, Ack, Consumer, Delivery, DispatchQueue, EntryFormat, EntryReceiver, LogEntry,
    LogLevel, LogSink, LogSinkBuilder, Metadata, Result, SinkConfig, SinkError, SinkMetrics,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
