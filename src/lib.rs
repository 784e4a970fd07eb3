//! Toolbelt - general-purpose utility helpers
//!
//! A grab bag of small, well-tested helpers: array and object manipulation
//! over JSON values, string transforms, date formatting, URL and query-string
//! editing, CSV parsing, validation patterns, and async function control
//! (condition waiting with timeout and cancellation, debounce, throttle).

pub mod arrays;
pub mod control;
pub mod csv;
pub mod datetime;
pub mod error;
pub mod objects;
pub mod patterns;
pub mod strings;
pub mod urls;
pub mod validate;

pub use control::{
    try_wait_for, wait_for, wait_until, CancelToken, Debouncer, Throttler, WaitError, WaitOptions,
};
pub use error::{FixSuggestion, ToolError};
