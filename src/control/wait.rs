//! Condition polling with timeout and cooperative cancellation
//!
//! [`try_wait_for`] re-evaluates a caller-supplied predicate on a fixed
//! interval until it produces a value, the timeout elapses, the cancel token
//! fires, or the predicate itself fails. Exactly one outcome is delivered;
//! evaluations never overlap, and a cancellation that lands while a predicate
//! is mid-flight drops that evaluation rather than waiting it out.

use std::convert::Infallible;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

use super::CancelToken;
use crate::error::FixSuggestion;

/// Default timeout for a wait (3 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
/// Default polling interval (50 milliseconds)
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);

/// Configuration for a single wait. Immutable once the wait starts.
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Give up after this much elapsed time.
    pub timeout: Duration,
    /// Delay between predicate evaluations.
    pub interval: Duration,
    /// Optional external abort signal.
    pub cancel: Option<CancelToken>,
    /// Evaluate once right away instead of waiting one interval first.
    pub immediate: bool,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            cancel: None,
            immediate: true,
        }
    }
}

impl WaitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }
}

/// Terminal outcome of a failed wait.
///
/// `Condition` carries the predicate's own error by value, unwrapped, so the
/// caller can still match on its concrete type.
#[derive(Error, Debug, PartialEq)]
pub enum WaitError<E> {
    #[error("condition not met within {0:?}")]
    Timeout(Duration),

    #[error("wait aborted")]
    Aborted,

    #[error("condition check failed: {0}")]
    Condition(E),
}

impl<E: std::fmt::Debug + std::fmt::Display> FixSuggestion for WaitError<E> {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            WaitError::Timeout(_) => {
                Some("Increase the timeout or verify the condition can become true")
            }
            WaitError::Aborted => Some("The cancel token fired; check who holds its clones"),
            WaitError::Condition(_) => None,
        }
    }
}

/// Poll `condition` until it yields a value or the wait fails.
///
/// The predicate reports `Ok(None)` for "not yet", `Ok(Some(v))` for
/// "satisfied with payload `v`", and `Err(e)` to fail the wait with `e`.
///
/// Outcome rules, in the order they are checked each cycle:
/// cancellation, then success, then predicate failure, then timeout. A
/// condition that becomes true on the same cycle the timeout is reached
/// therefore still succeeds.
pub async fn try_wait_for<F, Fut, T, E>(
    mut condition: F,
    options: WaitOptions,
) -> Result<T, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
        debug!("wait aborted before first evaluation");
        return Err(WaitError::Aborted);
    }

    let started = Instant::now();

    if !options.immediate && !pause(options.interval, options.cancel.as_ref()).await {
        return Err(WaitError::Aborted);
    }

    let mut cycle = 0u32;
    loop {
        cycle += 1;
        trace!(cycle, elapsed = ?started.elapsed(), "evaluating condition");

        // Race the evaluation against cancellation; an abort mid-flight
        // drops the evaluation and its eventual result.
        let checked = match &options.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(cycle, "wait aborted during evaluation");
                    return Err(WaitError::Aborted);
                }
                result = condition() => result,
            },
            None => condition().await,
        };

        // Cancellation observed after the evaluation beats a truthy result.
        if options.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            debug!(cycle, "wait aborted after evaluation");
            return Err(WaitError::Aborted);
        }

        match checked {
            Ok(Some(value)) => {
                debug!(cycle, elapsed = ?started.elapsed(), "condition met");
                return Ok(value);
            }
            Ok(None) => {}
            Err(err) => {
                debug!(cycle, "condition failed");
                return Err(WaitError::Condition(err));
            }
        }

        if started.elapsed() >= options.timeout {
            debug!(cycle, timeout = ?options.timeout, "wait timed out");
            return Err(WaitError::Timeout(options.timeout));
        }

        if !pause(options.interval, options.cancel.as_ref()).await {
            return Err(WaitError::Aborted);
        }
    }
}

/// [`try_wait_for`] for predicates that cannot fail.
pub async fn wait_for<F, Fut, T>(
    mut condition: F,
    options: WaitOptions,
) -> Result<T, WaitError<Infallible>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    try_wait_for(
        move || {
            let check = condition();
            async move { Ok::<_, Infallible>(check.await) }
        },
        options,
    )
    .await
}

/// [`try_wait_for`] for plain boolean predicates. Resolves to `()` once the
/// predicate first returns `true`.
pub async fn wait_until<F>(mut condition: F, options: WaitOptions) -> Result<(), WaitError<Infallible>>
where
    F: FnMut() -> bool,
{
    try_wait_for(
        move || {
            let ready = condition();
            async move { Ok::<_, Infallible>(ready.then_some(())) }
        },
        options,
    )
    .await
}

/// Sleep one interval, returning `false` if cancellation fires first.
async fn pause(interval: Duration, cancel: Option<&CancelToken>) -> bool {
    match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => false,
            _ = sleep(interval) => true,
        },
        None => {
            sleep(interval).await;
            true
        }
    }
}
