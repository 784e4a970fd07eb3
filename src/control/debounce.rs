//! Debounced execution on the tokio runtime

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Runs an action after a quiet period, restarting the clock on every call.
///
/// Only the most recent action survives: each [`call`](Self::call) aborts the
/// previously scheduled one. Must be used inside a tokio runtime.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `action` after the delay, replacing any pending action.
    pub fn call<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = self.pending.lock().expect("debouncer state poisoned");
        if let Some(previous) = pending.take() {
            trace!("debounce: replacing pending action");
            previous.abort();
        }
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
    }

    /// Drop the pending action, if any, without running it.
    pub fn cancel(&self) {
        if let Some(pending) = self.pending.lock().expect("debouncer state poisoned").take() {
            pending.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
