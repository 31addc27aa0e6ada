//! GET through libcurl's easy interface.

use super::{FetchRequest, Transport};
use crate::retry::{classify_http_status, FetchError};

/// Maximum redirects followed before giving up.
const MAX_REDIRECTIONS: u32 = 10;

/// Blocking transport backed by a fresh `curl::easy::Easy` per request.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurlTransport;

impl CurlTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for CurlTransport {
    /// Follows redirects and accepts any content encoding libcurl can decode.
    /// Invalid UTF-8 in the body is replaced rather than rejected.
    fn get(&mut self, request: &FetchRequest) -> Result<String, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTIONS)?;
        easy.accept_encoding("")?;
        easy.timeout(request.timeout)?;
        if let Some(proxy) = &request.proxy {
            easy.proxy(proxy)?;
        }

        let mut list = curl::easy::List::new();
        for (k, v) in &request.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !request.headers.is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        classify_http_status(code)?;
        tracing::debug!(status = code, bytes = body.len(), "GET {} completed", request.url);

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
