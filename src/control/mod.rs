//! Function-control utilities: condition waiting, debounce, throttle
//!
//! The one stateful corner of the crate. Everything here runs on tokio.

mod cancel;
mod debounce;
mod throttle;
mod wait;

pub use cancel::CancelToken;
pub use debounce::Debouncer;
pub use throttle::Throttler;
pub use wait::{
    try_wait_for, wait_for, wait_until, WaitError, WaitOptions, DEFAULT_INTERVAL, DEFAULT_TIMEOUT,
};
