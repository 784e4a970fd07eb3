//! End-to-end scenarios for condition waiting.
//!
//! All tests run on a paused clock, so timing assertions are exact.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use toolbelt::{try_wait_for, wait_for, wait_until, CancelToken, WaitError, WaitOptions};

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("probe failed: {0}")]
struct ProbeError(&'static str);

#[tokio::test(start_paused = true)]
async fn never_true_condition_times_out() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let started = Instant::now();

    let result = wait_until(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            false
        },
        WaitOptions::new()
            .timeout(Duration::from_millis(200))
            .interval(Duration::from_millis(50)),
    )
    .await;

    assert_eq!(result, Err(WaitError::Timeout(Duration::from_millis(200))));
    assert_eq!(started.elapsed(), Duration::from_millis(200));
    // Evaluations at 0, 50, 100, 150 and 200 ms.
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[tokio::test(start_paused = true)]
async fn pre_cancelled_token_aborts_without_evaluating() {
    let token = CancelToken::new();
    token.cancel();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let result = wait_until(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        },
        WaitOptions::new().cancel(token),
    )
    .await;

    assert_eq!(result, Err(WaitError::Aborted));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn cancelling_mid_wait_aborts_promptly() {
    let token = CancelToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(120)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let result = wait_until(
        || false,
        WaitOptions::new()
            .timeout(Duration::from_secs(2))
            .interval(Duration::from_millis(50))
            .cancel(token),
    )
    .await;

    assert_eq!(result, Err(WaitError::Aborted));
    assert!(started.elapsed() < Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn payload_is_delivered_on_success() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let started = Instant::now();

    let result = wait_for(
        move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move { (n >= 3).then_some("ready") }
        },
        WaitOptions::new()
            .interval(Duration::from_millis(50))
            .immediate(false),
    )
    .await;

    assert_eq!(result, Ok("ready"));
    assert_eq!(started.elapsed(), Duration::from_millis(150));
}

#[tokio::test(start_paused = true)]
async fn condition_error_fails_the_wait_unchanged() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let result: Result<(), _> = try_wait_for(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err::<Option<()>, _>(ProbeError("backend unreachable")) }
        },
        WaitOptions::new(),
    )
    .await;

    assert_eq!(
        result,
        Err(WaitError::Condition(ProbeError("backend unreachable")))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn cancellation_drops_an_in_flight_evaluation() {
    let token = CancelToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let result = wait_for(
        // Each evaluation takes a full second; the abort must not wait it out.
        || async {
            sleep(Duration::from_secs(1)).await;
            None::<()>
        },
        WaitOptions::new()
            .timeout(Duration::from_secs(10))
            .cancel(token),
    )
    .await;

    assert_eq!(result, Err(WaitError::Aborted));
    assert_eq!(started.elapsed(), Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn wait_until_resolves_when_the_flag_flips() {
    let flag = Arc::new(AtomicBool::new(false));
    let setter = Arc::clone(&flag);
    // Flip off a poll boundary so the very next poll observes the flag.
    tokio::spawn(async move {
        sleep(Duration::from_millis(475)).await;
        setter.store(true, Ordering::SeqCst);
    });

    let started = Instant::now();
    let result = wait_until(
        move || flag.load(Ordering::SeqCst),
        WaitOptions::new()
            .timeout(Duration::from_secs(2))
            .interval(Duration::from_millis(50)),
    )
    .await;

    assert_eq!(result, Ok(()));
    assert_eq!(started.elapsed(), Duration::from_millis(500));
}
