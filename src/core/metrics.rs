//! Sink metrics for observability
//!
//! Counters for the submission paths and the dispatch queue. They are
//! informational only; the drain protocol never reads them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for sink observability
///
/// # Example
///
/// ```
/// use rust_log_sink::SinkMetrics;
///
/// let metrics = SinkMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_acknowledged();
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.in_flight(), 0);
/// ```
#[derive(Debug)]
pub struct SinkMetrics {
    /// Entries built by `submit`/`write`
    submitted: AtomicU64,

    /// Entries rendered to the console writer
    console_rendered: AtomicU64,

    /// Console renders that failed with an I/O error
    render_failures: AtomicU64,

    /// Entries placed in the dispatch queue
    enqueued: AtomicU64,

    /// Entries acknowledged by a consumer
    acknowledged: AtomicU64,

    /// Number of times a producer had to wait for queue space
    block_events: AtomicU64,
}

impl SinkMetrics {
    pub const fn new() -> Self {
        Self {
            submitted: AtomicU64::new(0),
            console_rendered: AtomicU64::new(0),
            render_failures: AtomicU64::new(0),
            enqueued: AtomicU64::new(0),
            acknowledged: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn console_rendered(&self) -> u64 {
        self.console_rendered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn render_failures(&self) -> u64 {
        self.render_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn acknowledged(&self) -> u64 {
        self.acknowledged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_submitted(&self) -> u64 {
        self.submitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_console_rendered(&self) -> u64 {
        self.console_rendered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_render_failure(&self) -> u64 {
        self.render_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_acknowledged(&self) -> u64 {
        self.acknowledged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    /// Entries enqueued but not yet acknowledged
    ///
    /// Approximate while producers and consumers are active.
    pub fn in_flight(&self) -> u64 {
        self.enqueued().saturating_sub(self.acknowledged())
    }
}

impl Default for SinkMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SinkMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            submitted: AtomicU64::new(self.submitted()),
            console_rendered: AtomicU64::new(self.console_rendered()),
            render_failures: AtomicU64::new(self.render_failures()),
            enqueued: AtomicU64::new(self.enqueued()),
            acknowledged: AtomicU64::new(self.acknowledged()),
            block_events: AtomicU64::new(self.block_events()),
        }
    }
}
