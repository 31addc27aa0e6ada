use std::time::Duration;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry; the last attempt's failure is final.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Bounded linear backoff: the wait after attempt `n` is `n * backoff_unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). Values below 1 still allow one attempt.
    pub max_attempts: u32,
    /// Backoff unit.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// `attempt` is 1-based (1 = first attempt) and names the attempt that just failed.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.backoff_unit.saturating_mul(attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_backoff() {
        let mut p = RetryPolicy::default();
        p.max_attempts = 5;
        assert_eq!(p.decide(1), RetryDecision::RetryAfter(Duration::from_secs(5)));
        assert_eq!(p.decide(2), RetryDecision::RetryAfter(Duration::from_secs(10)));
        assert_eq!(p.decide(4), RetryDecision::RetryAfter(Duration::from_secs(20)));
    }

    #[test]
    fn respects_max_attempts() {
        let p = RetryPolicy::default();
        assert!(matches!(p.decide(1), RetryDecision::RetryAfter(_)));
        assert!(matches!(p.decide(2), RetryDecision::RetryAfter(_)));
        assert_eq!(p.decide(3), RetryDecision::NoRetry);
    }

    #[test]
    fn zero_attempts_never_retries() {
        let p = RetryPolicy {
            max_attempts: 0,
            backoff_unit: Duration::from_secs(1),
        };
        assert_eq!(p.decide(1), RetryDecision::NoRetry);
    }
}
