//! Consumer trait for draining the dispatch queue

use super::dispatch::EntryReceiver;
use super::error::Result;
use super::log_entry::LogEntry;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Reader side of the pipeline
///
/// Implementations decide what happens to an entry (write it, ship it,
/// count it). The entry is acknowledged after `consume` returns, whatever
/// the outcome.
pub trait Consumer: Send {
    fn consume(&mut self, entry: &LogEntry) -> Result<()>;

    fn name(&self) -> &str {
        "consumer"
    }
}

/// Consumer backed by a closure
pub struct FnConsumer<F> {
    name: String,
    f: F,
}

/// Wrap a closure as a named [`Consumer`]
///
/// # Example
///
/// ```
/// use rust_log_sink::prelude::*;
///
/// let sink = LogSink::new();
/// let handle = sink
///     .receiver()
///     .spawn(consumer_fn("printer", |entry| {
///         println!("{} from {}", entry.message, entry.actor);
///         Ok(())
///     }))
///     .unwrap();
///
/// sink.submit(LogLevel::Information, "boot", "ready", "system");
/// sink.shutdown();
/// assert_eq!(handle.join().unwrap(), 1);
/// ```
pub fn consumer_fn<F>(name: impl Into<String>, f: F) -> FnConsumer<F>
where
    F: FnMut(&LogEntry) -> Result<()> + Send,
{
    FnConsumer {
        name: name.into(),
        f,
    }
}

impl<F> Consumer for FnConsumer<F>
where
    F: FnMut(&LogEntry) -> Result<()> + Send,
{
    fn consume(&mut self, entry: &LogEntry) -> Result<()> {
        (self.f)(entry)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Drain `receiver` into `consumer` until the queue closes
///
/// A failing or panicking consumer does not stall shutdown: the entry is
/// reported on stderr and acknowledged anyway.
pub(crate) fn run_consumer<C: Consumer + ?Sized>(receiver: &EntryReceiver, consumer: &mut C) -> u64 {
    let mut handled = 0;

    while let Some(delivery) = receiver.recv() {
        let result = catch_unwind(AssertUnwindSafe(|| consumer.consume(&delivery)));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!(
                    "[LOG SINK ERROR] Consumer '{}' failed: {}",
                    consumer.name(),
                    e
                );
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOG SINK CRITICAL] Consumer '{}' panicked: {}. \
                     Entry acknowledged, consumer continues.",
                    consumer.name(),
                    panic_message(panic_info.as_ref())
                );
            }
        }

        delivery.ack();
        handled += 1;
    }

    handled
}
