//! Core sink types: entries, the dispatch queue and the sink facade

pub mod config;
pub mod consumer;
pub mod dispatch;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod metadata;
pub mod metrics;
pub mod sink;

pub use config::SinkConfig;
pub use consumer::{consumer_fn, Consumer, FnConsumer};
pub use dispatch::{
    Ack, Delivery, DispatchQueue, EntryReceiver, DEFAULT_QUEUE_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use error::{Result, SinkError};
pub use log_entry::{EntryFormat, LogEntry};
pub use log_level::LogLevel;
pub use metadata::Metadata;
pub use metrics::SinkMetrics;
pub use sink::{LogSink, LogSinkBuilder};
