use std::fmt;

use async_trait::async_trait;

use super::types::Page;

/// Errors that can occur while fetching a page.
/// None of them are retried here; the load controller decides what happens next.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Transport failure (DNS, connection refused, reset).
    Network(String),
    /// Upstream answered with a non-success status or an error object.
    Api { status: u16, message: String },
    /// Body did not match the expected schema.
    Decode(String),
    /// Request did not finish within the configured bound (seconds).
    Timeout(u64),
    /// Pages are 1-based.
    InvalidPage(u32),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FetchError::Decode(msg) => write!(f, "decode error: {msg}"),
            FetchError::Timeout(secs) => write!(f, "timed out after {secs}s"),
            FetchError::InvalidPage(page) => write!(f, "invalid page index {page}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// A paginated, read-only source of directory records.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the name of the source, for logs.
    fn name(&self) -> &str;

    /// Fetches one page. `page` is 1-based. An empty page is a success.
    async fn fetch(&self, page: u32) -> Result<Page, FetchError>;
}
