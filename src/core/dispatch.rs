//! Bounded dispatch queue with a drain-before-close completion barrier
//!
//! The queue pairs a bounded crossbeam channel with an outstanding-work
//! counter:
//!
//! - the counter starts at 1, the hold of the running process;
//! - every enqueue adds 1 *before* the entry is placed in the channel;
//! - every entry is released exactly once when its [`Ack`] is dropped,
//!   which happens when the consumer is done with the [`Delivery`];
//! - shutdown releases the process hold and waits for the counter to hit 0.
//!
//! A watcher thread waits for zero and only then drops the last sender,
//! so the channel is closed exactly once and never while entries are
//! still outstanding.

use super::consumer::{run_consumer, Consumer};
use super::error::{Result, SinkError};
use super::log_entry::LogEntry;
use super::metrics::SinkMetrics;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use parking_lot::{Condvar, Mutex, RwLock};
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Capacity of the dispatch queue unless configured otherwise
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Shutdown timeout used when a queue is dropped without explicit shutdown (5 seconds)
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
struct CompletionState {
    outstanding: usize,
    shutdown_requested: bool,
}

/// Outstanding-work counter gating queue closure
///
/// Increment and the shutdown check share one critical section, so once
/// shutdown has been requested the counter can only move towards zero.
#[derive(Debug)]
pub(crate) struct Completion {
    state: Mutex<CompletionState>,
    drained: Condvar,
}

impl Completion {
    fn new() -> Self {
        Self {
            state: Mutex::new(CompletionState {
                outstanding: 1,
                shutdown_requested: false,
            }),
            drained: Condvar::new(),
        }
    }

    fn add(&self) {
        let mut state = self.state.lock();
        if state.shutdown_requested {
            drop(state);
            panic!("log entry submitted after dispatch queue shutdown was requested");
        }
        state.outstanding += 1;
    }

    fn done(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.outstanding > 0, "completion counter underflow");
        state.outstanding -= 1;
        if state.outstanding == 0 {
            self.drained.notify_all();
        }
    }

    /// Release the process hold taken at creation
    fn release(&self) {
        let mut state = self.state.lock();
        if state.shutdown_requested {
            drop(state);
            panic!("dispatch queue shutdown requested more than once");
        }
        state.shutdown_requested = true;
        state.outstanding -= 1;
        if state.outstanding == 0 {
            self.drained.notify_all();
        }
    }

    fn wait_drained(&self) {
        let mut state = self.state.lock();
        while state.outstanding > 0 {
            self.drained.wait(&mut state);
        }
    }

    fn wait_drained_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.outstanding > 0 {
            if self.drained.wait_until(&mut state, deadline).timed_out() {
                return state.outstanding == 0;
            }
        }
        true
    }

    fn outstanding(&self) -> usize {
        self.state.lock().outstanding
    }

    fn shutdown_requested(&self) -> bool {
        self.state.lock().shutdown_requested
    }
}

/// Completion token for one enqueued entry
///
/// Created when the entry is enqueued; dropping it acknowledges the entry,
/// so each entry is acknowledged exactly once.
#[derive(Debug)]
pub struct Ack {
    completion: Arc<Completion>,
    metrics: Arc<SinkMetrics>,
}

impl Ack {
    fn acquire(completion: &Arc<Completion>, metrics: &Arc<SinkMetrics>) -> Self {
        completion.add();
        Self {
            completion: Arc::clone(completion),
            metrics: Arc::clone(metrics),
        }
    }

    /// Acknowledge the entry now
    pub fn ack(self) {
        drop(self);
    }
}

impl Drop for Ack {
    fn drop(&mut self) {
        self.metrics.record_acknowledged();
        self.completion.done();
    }
}

/// An entry handed to a consumer together with its completion token
///
/// Hold the delivery until the entry is fully handled, then call
/// [`Delivery::ack`] or drop it. Use [`Delivery::into_parts`] to keep the
/// entry and the token apart.
#[derive(Debug)]
#[must_use = "dropping a delivery acknowledges its entry"]
pub struct Delivery {
    entry: LogEntry,
    ack: Ack,
}

impl Delivery {
    pub fn entry(&self) -> &LogEntry {
        &self.entry
    }

    /// Acknowledge the entry as fully handled
    pub fn ack(self) {
        drop(self);
    }

    pub fn into_parts(self) -> (LogEntry, Ack) {
        (self.entry, self.ack)
    }
}

impl Deref for Delivery {
    type Target = LogEntry;

    fn deref(&self) -> &LogEntry {
        &self.entry
    }
}

/// Bounded FIFO of log entries plus the completion counter
///
/// The queue keeps a receiver of its own, so buffered entries stay queued
/// even while no consumer handle exists.
pub struct DispatchQueue {
    sender: Arc<RwLock<Option<Sender<Delivery>>>>,
    receiver: Receiver<Delivery>,
    completion: Arc<Completion>,
    closed: Arc<AtomicBool>,
    watcher: Mutex<Option<JoinHandle<()>>>,
    metrics: Arc<SinkMetrics>,
    capacity: usize,
}

impl DispatchQueue {
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_metrics(capacity, Arc::new(SinkMetrics::new()))
    }

    pub(crate) fn with_metrics(capacity: usize, metrics: Arc<SinkMetrics>) -> Result<Self> {
        if capacity == 0 {
            return Err(SinkError::config(
                "DispatchQueue",
                "capacity must be at least 1",
            ));
        }

        let (sender, receiver) = bounded(capacity);
        let sender = Arc::new(RwLock::new(Some(sender)));
        let completion = Arc::new(Completion::new());
        let closed = Arc::new(AtomicBool::new(false));

        let watcher = {
            let sender = Arc::clone(&sender);
            let completion = Arc::clone(&completion);
            let closed = Arc::clone(&closed);
            thread::Builder::new()
                .name("log-sink-watcher".to_string())
                .spawn(move || {
                    completion.wait_drained();
                    closed.store(true, Ordering::Release);
                    // Dropping the only sender closes the channel for every receiver
                    drop(sender.write().take());
                })
                .map_err(|e| {
                    SinkError::io_operation(
                        "spawning watcher thread",
                        "dispatch queue cannot start",
                        e,
                    )
                })?
        };

        Ok(Self {
            sender,
            receiver,
            completion,
            closed,
            watcher: Mutex::new(Some(watcher)),
            metrics,
            capacity,
        })
    }

    /// Place an entry in the queue, blocking while the queue is full
    ///
    /// # Panics
    ///
    /// Panics if shutdown has already been requested.
    pub fn enqueue(&self, entry: LogEntry) {
        let ack = Ack::acquire(&self.completion, &self.metrics);

        // Held across a blocking send; the watcher only takes the write
        // side once the counter is zero, which cannot happen while this
        // entry is unacknowledged.
        let guard = self.sender.read();
        let Some(sender) = guard.as_ref() else {
            panic!("log entry enqueued into a closed dispatch queue");
        };

        let delivery = Delivery { entry, ack };
        let sent = match sender.try_send(delivery) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(delivery)) => {
                self.metrics.record_block();
                sender.send(delivery).map_err(|_| ())
            }
            Err(TrySendError::Disconnected(_)) => Err(()),
        };
        if sent.is_err() {
            panic!("log entry enqueued into a closed dispatch queue");
        }
        self.metrics.record_enqueued();
    }

    /// A new handle for reading entries off the queue
    pub fn receiver(&self) -> EntryReceiver {
        EntryReceiver {
            receiver: self.receiver.clone(),
            closed: Arc::clone(&self.closed),
        }
    }

    /// Release the process hold and block until every entry is acknowledged
    /// and the queue is closed
    ///
    /// # Panics
    ///
    /// Panics if shutdown was already requested.
    pub fn shutdown(&self) {
        self.completion.release();
        self.completion.wait_drained();
        self.join_watcher();
    }

    /// Like [`shutdown`](Self::shutdown), but gives up waiting after `timeout`
    ///
    /// Returns `true` if the queue drained and closed in time. On timeout
    /// the queue still closes by itself once the remaining entries are
    /// acknowledged.
    pub fn shutdown_timeout(&self, timeout: Duration) -> bool {
        self.completion.release();
        if !self.completion.wait_drained_for(timeout) {
            eprintln!(
                "[LOG SINK WARNING] Dispatch queue not drained within {:?}: {} entries outstanding.",
                timeout,
                self.completion.outstanding()
            );
            return false;
        }
        self.join_watcher();
        true
    }

    fn join_watcher(&self) {
        if let Some(handle) = self.watcher.lock().take() {
            if let Err(e) = handle.join() {
                eprintln!("[LOG SINK ERROR] Dispatch watcher thread panicked: {:?}", e);
            }
        }
    }

    /// Current value of the completion counter
    ///
    /// Includes the process hold, so an idle queue that has not been shut
    /// down reports 1.
    pub fn outstanding(&self) -> usize {
        self.completion.outstanding()
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.completion.shutdown_requested()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Entries currently buffered
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn metrics(&self) -> &SinkMetrics {
        &self.metrics
    }
}

impl Drop for DispatchQueue {
    fn drop(&mut self) {
        if !self.completion.shutdown_requested() {
            self.shutdown_timeout(DEFAULT_SHUTDOWN_TIMEOUT);
        }
    }
}

/// Read side of the dispatch queue
///
/// Cloneable; several consumers may read concurrently. `recv` returns
/// `None` once the queue has been closed and drained.
#[derive(Debug, Clone)]
pub struct EntryReceiver {
    receiver: Receiver<Delivery>,
    closed: Arc<AtomicBool>,
}

impl EntryReceiver {
    /// Block until an entry arrives, or return `None` once closed and drained
    pub fn recv(&self) -> Option<Delivery> {
        self.receiver.recv().ok()
    }

    pub fn try_recv(&self) -> Option<Delivery> {
        self.receiver.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Delivery> {
        self.receiver.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => SinkError::ReceiveTimeout,
            RecvTimeoutError::Disconnected => SinkError::QueueClosed,
        })
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Feed every entry to `consumer` on the current thread until the queue closes
    ///
    /// Returns the number of entries handled.
    pub fn run<C: Consumer + ?Sized>(self, consumer: &mut C) -> u64 {
        run_consumer(&self, consumer)
    }

    /// Run `consumer` on a dedicated thread
    ///
    /// The thread ends once the queue is closed and drained; joining it
    /// yields the number of entries handled.
    pub fn spawn<C: Consumer + 'static>(self, mut consumer: C) -> Result<JoinHandle<u64>> {
        let name = format!("log-sink-consumer-{}", consumer.name());
        thread::Builder::new()
            .name(name)
            .spawn(move || run_consumer(&self, &mut consumer))
            .map_err(|e| {
                SinkError::io_operation("spawning consumer thread", "consumer cannot start", e)
            })
    }
}

impl Iterator for EntryReceiver {
    type Item = Delivery;

    fn next(&mut self) -> Option<Delivery> {
        self.recv()
    }
}
