//! Retry and backoff policy.
//!
//! This module holds the transport error union, classification of libcurl
//! failures and HTTP statuses into it, and the linear backoff loop shared by
//! the sync orchestration.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{RetryDecision, RetryPolicy};
pub use run::{run_with_retry, Sleeper, ThreadSleeper};
