//! Retry loop: run a closure until success or policy says stop.

use super::policy::{RetryDecision, RetryPolicy};
use std::time::Duration;

/// Blocks the caller between attempts.
pub trait Sleeper {
    fn sleep(&mut self, delay: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &mut S {
    fn sleep(&mut self, delay: Duration) {
        (**self).sleep(delay);
    }
}

/// Runs `f` (given the 1-based attempt number) until it succeeds or the policy
/// says to stop, sleeping for the backoff delay between attempts.
///
/// Returns the number of attempts made together with the final result.
pub fn run_with_retry<T, E, F, S>(
    policy: &RetryPolicy,
    sleeper: &mut S,
    mut f: F,
) -> (u32, Result<T, E>)
where
    F: FnMut(u32) -> Result<T, E>,
    S: Sleeper + ?Sized,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(v) => return (attempt, Ok(v)),
            Err(e) => match policy.decide(attempt) {
                RetryDecision::NoRetry => return (attempt, Err(e)),
                RetryDecision::RetryAfter(d) => {
                    tracing::info!(attempt, "waiting {}s before retry", d.as_secs());
                    sleeper.sleep(d);
                    attempt += 1;
                }
            },
        }
    }
}
