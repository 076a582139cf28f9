//! Collapses rapid repeated triggers into one delayed delivery carrying the
//! latest argument.
//!
//! The debouncer is a two-state machine: idle, or pending with the most
//! recent argument parked behind a timer. Each new call cancels the pending
//! timer and re-arms it, so only the argument that survives a full quiet
//! window is delivered. Delivery goes through an unbounded channel; the
//! consumer acts on whatever arrives there, which by construction is the
//! debouncer's latest surviving invocation.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

pub struct Debouncer<T> {
    quiet: Duration,
    sink: UnboundedSender<T>,
    pending: Option<AbortHandle>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(quiet: Duration, sink: UnboundedSender<T>) -> Self {
        Self {
            quiet,
            sink,
            pending: None,
        }
    }

    /// Arm the timer with a fresh argument, cancelling any pending delivery.
    pub fn call(&mut self, value: T) {
        self.cancel_pending();

        let sink = self.sink.clone();
        let quiet = self.quiet;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            // Receiver gone means nobody cares about deliveries anymore
            let _ = sink.send(value);
        });
        self.pending = Some(handle.abort_handle());
    }

    /// Drop whatever is waiting on the timer; the next `call` starts fresh.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
