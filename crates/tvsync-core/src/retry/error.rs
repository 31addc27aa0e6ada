//! Transport error type for retry handling.

/// Why a single GET did not produce a response body.
///
/// Every variant is retryable; the distinction is kept for logs and for
/// callers inspecting the final outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Connect or transfer exceeded the request timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Network-level failure (DNS, refused, reset, proxy, TLS, etc.).
    #[error("connection failed: {0}")]
    Connection(String),
    /// Response arrived with a non-2xx status.
    #[error("HTTP {0}")]
    BadStatus(u32),
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        super::classify_curl_error(&e)
    }
}
