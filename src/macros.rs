//! Logging macros for ergonomic message formatting.
//!
//! Each macro takes the sink, the event payload and the actor, followed by
//! a `format!`-style message.
//!
//! # Examples
//!
//! ```
//! use rust_log_sink::prelude::*;
//! use rust_log_sink::info;
//!
//! let sink = LogSink::builder().queue_output(false).build().unwrap();
//!
//! // Basic logging
//! info!(sink, "startup", "system", "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(sink, "startup", "system", "Server listening on port {}", port);
//!
//! sink.shutdown();
//! ```

/// Submit an entry with a formatted message.
///
/// # Examples
///
/// ```
/// # use rust_log_sink::prelude::*;
/// # let sink = LogSink::builder().queue_output(false).build().unwrap();
/// use rust_log_sink::log;
/// log!(sink, LogLevel::Information, "evt", "system", "Simple message");
/// log!(sink, LogLevel::Error, "evt", "system", "Error code: {}", 500);
/// # sink.shutdown();
/// ```
#[macro_export]
macro_rules! log {
    ($sink:expr, $level:expr, $event:expr, $actor:expr, $($arg:tt)+) => {
        $sink.submit($level, &$event, format!($($arg)+), $actor)
    };
}

/// Submit a debug-level entry.
#[macro_export]
macro_rules! debug {
    ($sink:expr, $event:expr, $actor:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::LogLevel::Debug, $event, $actor, $($arg)+)
    };
}

/// Submit an information-level entry.
#[macro_export]
macro_rules! info {
    ($sink:expr, $event:expr, $actor:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::LogLevel::Information, $event, $actor, $($arg)+)
    };
}

/// Submit a warning-level entry.
///
/// # Examples
///
/// ```
/// # use rust_log_sink::prelude::*;
/// # let sink = LogSink::builder().queue_output(false).build().unwrap();
/// use rust_log_sink::warning;
/// warning!(sink, "disk", "monitor", "Retry attempt {} of {}", 3, 5);
/// # sink.shutdown();
/// ```
#[macro_export]
macro_rules! warning {
    ($sink:expr, $event:expr, $actor:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::LogLevel::Warning, $event, $actor, $($arg)+)
    };
}

/// Submit an error-level entry.
#[macro_export]
macro_rules! error {
    ($sink:expr, $event:expr, $actor:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::LogLevel::Error, $event, $actor, $($arg)+)
    };
}

/// Submit a fatal-level entry.
#[macro_export]
macro_rules! fatal {
    ($sink:expr, $event:expr, $actor:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::LogLevel::Fatal, $event, $actor, $($arg)+)
    };
}

/// Submit a success-level entry.
#[macro_export]
macro_rules! success {
    ($sink:expr, $event:expr, $actor:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::LogLevel::Success, $event, $actor, $($arg)+)
    };
}

/// Submit a failure-level entry.
#[macro_export]
macro_rules! failure {
    ($sink:expr, $event:expr, $actor:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::LogLevel::Failure, $event, $actor, $($arg)+)
    };
}

/// Submit a critical-level entry.
#[macro_export]
macro_rules! critical {
    ($sink:expr, $event:expr, $actor:expr, $($arg:tt)+) => {
        $crate::log!($sink, $crate::LogLevel::Critical, $event, $actor, $($arg)+)
    };
}
