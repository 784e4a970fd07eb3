//! Rate-limited execution on the tokio runtime

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Runs an action at most once per cooldown window.
///
/// The first call inside a window runs immediately; calls landing during the
/// cooldown are discarded, not queued. Must be used inside a tokio runtime.
pub struct Throttler {
    cooldown: Duration,
    gate: Arc<AtomicBool>,
}

impl Throttler {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            gate: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run `action` unless a cooldown is open. Returns whether it ran.
    pub fn call<F>(&self, action: F) -> bool
    where
        F: FnOnce(),
    {
        if self.gate.swap(true, Ordering::SeqCst) {
            return false;
        }
        action();

        let gate = Arc::clone(&self.gate);
        let cooldown = self.cooldown;
        tokio::spawn(async move {
            tokio::time::sleep(cooldown).await;
            gate.store(false, Ordering::SeqCst);
        });
        true
    }
}
