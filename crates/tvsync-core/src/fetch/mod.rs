//! Single HTTP GET of the playlist source.
//!
//! The sync loop only depends on the `Transport` trait; `CurlTransport` is the
//! libcurl-backed implementation used in production.

mod easy;

pub use crate::retry::FetchError;
pub use easy::CurlTransport;

use std::time::Duration;

/// Everything needed to issue the GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    /// Header name/value pairs, sent in order.
    pub headers: Vec<(String, String)>,
    /// Proxy for both HTTP and HTTPS, if any.
    pub proxy: Option<String>,
    pub timeout: Duration,
}

/// Performs a blocking GET and returns the response body as text.
pub trait Transport {
    fn get(&mut self, request: &FetchRequest) -> Result<String, FetchError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn get(&mut self, request: &FetchRequest) -> Result<String, FetchError> {
        (**self).get(request)
    }
}
