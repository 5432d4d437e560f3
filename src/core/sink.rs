//! Log sink facade: entry construction, console output and dispatch

use super::{
    config::SinkConfig,
    dispatch::{DispatchQueue, EntryReceiver, DEFAULT_QUEUE_CAPACITY},
    error::{Result, SinkError},
    log_entry::{EntryFormat, LogEntry},
    log_level::LogLevel,
    metadata::Metadata,
    metrics::SinkMetrics,
};
use crate::appenders::console::{ColorToken, ConsoleSettings, ConsoleWriter};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Owns the console writer and the dispatch queue
///
/// Queue output is on from the start; console output is opt-in. The sink
/// is `Sync`, so share it behind an `Arc` (or a `static`) and submit from
/// any number of threads.
///
/// # Example
///
/// ```
/// use rust_log_sink::prelude::*;
///
/// let sink = LogSink::new();
/// let consumer = sink
///     .receiver()
///     .spawn(consumer_fn("audit", |entry| {
///         assert_eq!(entry.actor, "system");
///         Ok(())
///     }))
///     .unwrap();
///
/// sink.submit(LogLevel::Information, "Hello World 1", "Database Initialized", "system");
/// sink.submit_with_metadata(
///     LogLevel::Success,
///     "Hello World 2",
///     "Network Initialized",
///     "system",
///     Metadata::new().with_field("port", 8080),
/// );
///
/// sink.shutdown();
/// assert_eq!(consumer.join().unwrap(), 2);
/// ```
pub struct LogSink {
    write_to_console: AtomicBool,
    write_to_queue: AtomicBool,
    console: ConsoleWriter,
    settings: ConsoleSettings,
    queue: DispatchQueue,
    metrics: Arc<SinkMetrics>,
}

impl LogSink {
    /// Create a sink with the default configuration
    ///
    /// # Panics
    ///
    /// Panics if the dispatch watcher thread cannot be spawned.
    #[must_use]
    pub fn new() -> Self {
        Self::builder()
            .build()
            .unwrap_or_else(|e| panic!("failed to create log sink: {}", e))
    }

    pub fn from_config(config: &SinkConfig) -> Result<Self> {
        config.validate()?;
        Self::builder()
            .capacity(config.capacity)
            .console_output(config.write_to_console)
            .queue_output(config.write_to_queue)
            .key_color(config.key_color.as_str())
            .value_color(config.value_color.as_str())
            .build()
    }

    #[must_use]
    pub fn builder() -> LogSinkBuilder {
        LogSinkBuilder::new()
    }

    /// Enable console output, chainable at construction
    #[must_use]
    pub fn write_to_console(self) -> Self {
        self.set_write_to_console(true);
        self
    }

    pub fn set_write_to_console(&self, enabled: bool) {
        self.write_to_console.store(enabled, Ordering::Relaxed);
    }

    pub fn is_writing_to_console(&self) -> bool {
        self.write_to_console.load(Ordering::Relaxed)
    }

    pub fn set_write_to_queue(&self, enabled: bool) {
        self.write_to_queue.store(enabled, Ordering::Relaxed);
    }

    pub fn is_writing_to_queue(&self) -> bool {
        self.write_to_queue.load(Ordering::Relaxed)
    }

    /// Replace both console colors; takes effect on the next render
    pub fn set_console_colors(
        &self,
        key_color: impl Into<ColorToken>,
        value_color: impl Into<ColorToken>,
    ) {
        self.settings.set_colors(key_color, value_color);
    }

    pub fn console_settings(&self) -> &ConsoleSettings {
        &self.settings
    }

    /// Build an entry and route it to the enabled outputs
    pub fn submit<E>(
        &self,
        level: LogLevel,
        event: &E,
        message: impl Into<String>,
        actor: impl Into<String>,
    ) where
        E: Serialize + ?Sized,
    {
        self.write(LogEntry::new(level, event, message, actor));
    }

    pub fn submit_with_metadata<E>(
        &self,
        level: LogLevel,
        event: &E,
        message: impl Into<String>,
        actor: impl Into<String>,
        metadata: Metadata,
    ) where
        E: Serialize + ?Sized,
    {
        self.write(LogEntry::new(level, event, message, actor).with_metadata(metadata));
    }

    pub fn submit_with_format<E>(
        &self,
        level: LogLevel,
        event: &E,
        message: impl Into<String>,
        actor: impl Into<String>,
        metadata: Option<Metadata>,
        format: EntryFormat,
    ) where
        E: Serialize + ?Sized,
    {
        let mut entry = LogEntry::new(level, event, message, actor).with_format(format);
        entry.metadata = metadata;
        self.write(entry);
    }

    /// Route a prebuilt entry
    ///
    /// The console render happens first and synchronously; the entry is
    /// then moved into the queue, blocking while the queue is full. With
    /// both outputs disabled the entry is discarded.
    ///
    /// # Panics
    ///
    /// Panics if queue output is enabled and shutdown has already begun.
    pub fn write(&self, entry: LogEntry) {
        self.metrics.record_submitted();

        if self.is_writing_to_console() {
            self.render_console(&entry);
        }
        if self.is_writing_to_queue() {
            self.queue.enqueue(entry);
        }
    }

    fn render_console(&self, entry: &LogEntry) {
        match self.console.render(entry, &self.settings) {
            Ok(()) => {
                self.metrics.record_console_rendered();
            }
            Err(e) => {
                let failures = self.metrics.record_render_failure();
                // Alert on first failure and periodically thereafter
                if failures == 0 || (failures + 1).is_multiple_of(1000) {
                    eprintln!(
                        "[LOG SINK ERROR] Console render failed ({} total): {}",
                        failures + 1,
                        e
                    );
                }
            }
        }
    }

    /// A new read handle on the dispatch queue for a consumer
    pub fn receiver(&self) -> EntryReceiver {
        self.queue.receiver()
    }

    /// Block until every submitted entry has been acknowledged, then close the queue
    ///
    /// Call once, after the last submission. A consumer that stops
    /// acknowledging stalls this call indefinitely; see
    /// [`shutdown_timeout`](Self::shutdown_timeout).
    ///
    /// # Panics
    ///
    /// Panics if shutdown was already requested.
    pub fn shutdown(&self) {
        self.queue.shutdown();
    }

    /// Shutdown that waits at most `timeout` for the queue to drain
    ///
    /// Returns `true` if the queue drained and closed in time.
    pub fn shutdown_timeout(&self, timeout: Duration) -> bool {
        self.queue.shutdown_timeout(timeout)
    }

    pub fn is_shut_down(&self) -> bool {
        self.queue.is_shutdown_requested()
    }

    pub fn is_closed(&self) -> bool {
        self.queue.is_closed()
    }

    /// Current value of the completion counter (1 while idle and running)
    pub fn outstanding(&self) -> usize {
        self.queue.outstanding()
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue.capacity()
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a LogSink with a fluent API
///
/// # Example
/// ```
/// use rust_log_sink::prelude::*;
///
/// let sink = LogSink::builder()
///     .capacity(500)
///     .console_output(true)
///     .key_color("blue")
///     .value_color("green")
///     .build()
///     .unwrap();
///
/// assert_eq!(sink.queue_capacity(), 500);
/// sink.shutdown();
/// ```
pub struct LogSinkBuilder {
    capacity: usize,
    write_to_console: bool,
    write_to_queue: bool,
    key_color: ColorToken,
    value_color: ColorToken,
    console_writer: Option<ConsoleWriter>,
}

impl LogSinkBuilder {
    pub fn new() -> Self {
        let settings = ConsoleSettings::default();
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
            write_to_console: false,
            write_to_queue: true,
            key_color: settings.key_color(),
            value_color: settings.value_color(),
            console_writer: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_output(mut self, enabled: bool) -> Self {
        self.write_to_console = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_output(mut self, enabled: bool) -> Self {
        self.write_to_queue = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn key_color(mut self, token: impl Into<ColorToken>) -> Self {
        self.key_color = token.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn value_color(mut self, token: impl Into<ColorToken>) -> Self {
        self.value_color = token.into();
        self
    }

    /// Render to this writer instead of stdout
    #[must_use = "builder methods return a new value"]
    pub fn console_writer(mut self, writer: ConsoleWriter) -> Self {
        self.console_writer = Some(writer);
        self
    }

    pub fn build(self) -> Result<LogSink> {
        if self.capacity == 0 {
            return Err(SinkError::config("LogSink", "capacity must be at least 1"));
        }

        let metrics = Arc::new(SinkMetrics::new());
        let queue = DispatchQueue::with_metrics(self.capacity, Arc::clone(&metrics))?;

        Ok(LogSink {
            write_to_console: AtomicBool::new(self.write_to_console),
            write_to_queue: AtomicBool::new(self.write_to_queue),
            console: self.console_writer.unwrap_or_default(),
            settings: ConsoleSettings::new(self.key_color, self.value_color),
            queue,
            metrics,
        })
    }
}

impl Default for LogSinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io::{self, Write};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn console_sink(buffer: &SharedBuffer) -> LogSink {
        LogSink::builder()
            .console_output(true)
            .queue_output(false)
            .key_color(ColorToken::PLAIN)
            .value_color(ColorToken::PLAIN)
            .console_writer(ConsoleWriter::with_writer(Box::new(buffer.clone())))
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let sink = LogSink::new();
        assert!(!sink.is_writing_to_console());
        assert!(sink.is_writing_to_queue());
        assert_eq!(sink.queue_capacity(), DEFAULT_QUEUE_CAPACITY);
        assert_eq!(sink.outstanding(), 1);
        sink.shutdown();
        assert!(sink.is_closed());
    }

    #[test]
    fn test_write_to_console_is_chainable() {
        let sink = LogSink::new().write_to_console();
        assert!(sink.is_writing_to_console());
        sink.shutdown();
    }

    #[test]
    fn test_builder_rejects_zero_capacity() {
        let result = LogSink::builder().capacity(0).build();
        assert!(matches!(result, Err(SinkError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_from_config() {
        let config = SinkConfig {
            capacity: 7,
            write_to_console: true,
            key_color: "blue".to_string(),
            ..SinkConfig::default()
        };
        let sink = LogSink::from_config(&config).unwrap();
        assert_eq!(sink.queue_capacity(), 7);
        assert!(sink.is_writing_to_console());
        assert_eq!(
            sink.console_settings().key_color(),
            ColorToken::new(colored::Color::Blue)
        );
        sink.set_write_to_console(false);
        sink.shutdown();
    }

    #[test]
    fn test_console_only_sink_does_not_touch_queue() {
        let buffer = SharedBuffer::default();
        let sink = console_sink(&buffer);

        sink.submit(LogLevel::Warning, "disk", "low space", "monitor");

        assert_eq!(sink.outstanding(), 1);
        assert_eq!(sink.metrics().console_rendered(), 1);
        assert!(buffer.contents().contains("Warning\tEvent:\"disk\" Message:\"low space\""));
        sink.shutdown();
    }

    #[test]
    fn test_absent_and_empty_metadata_render_differently() {
        let buffer = SharedBuffer::default();
        let sink = console_sink(&buffer);

        sink.submit(LogLevel::Information, "a", "absent", "system");
        sink.submit_with_metadata(LogLevel::Information, "b", "empty", "system", Metadata::new());

        let output = buffer.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(!lines[0].contains("More Info"));
        assert!(lines[1].ends_with("More Info:\"\" "));
        sink.shutdown();
    }

    #[test]
    fn test_both_outputs_disabled_discards() {
        let sink = LogSink::builder().queue_output(false).build().unwrap();
        sink.submit(LogLevel::Debug, "x", "dropped", "test");
        assert_eq!(sink.metrics().submitted(), 1);
        assert_eq!(sink.metrics().enqueued(), 0);
        assert_eq!(sink.metrics().console_rendered(), 0);
        sink.shutdown();
    }

    #[test]
    fn test_format_hint_adds_blank_lines() {
        let buffer = SharedBuffer::default();
        let sink = console_sink(&buffer);

        sink.submit_with_format(
            LogLevel::Success,
            "fmt",
            "spaced",
            "system",
            None,
            EntryFormat::lines_after(1),
        );

        assert!(buffer.contents().ends_with("Actor:\"system\" \n\n"));
        sink.shutdown();
    }

    #[test]
    #[should_panic(expected = "after dispatch queue shutdown")]
    fn test_submit_after_shutdown_panics() {
        let sink = LogSink::new();
        sink.shutdown();
        sink.submit(LogLevel::Error, "late", "too late", "test");
    }
}
