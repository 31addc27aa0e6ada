//! Classify HTTP status and curl errors into `FetchError`.

use super::error::FetchError;

/// `Ok` for 2xx, `BadStatus` otherwise.
pub fn classify_http_status(code: u32) -> Result<(), FetchError> {
    match code {
        200..=299 => Ok(()),
        _ => Err(FetchError::BadStatus(code)),
    }
}

/// Timeouts are reported as such; any other curl failure is a connection failure.
pub fn classify_curl_error(e: &curl::Error) -> FetchError {
    if e.is_operation_timedout() {
        return FetchError::Timeout(e.to_string());
    }
    FetchError::Connection(e.to_string())
}
