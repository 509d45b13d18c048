use thiserror::Error;

/// Everything that can go wrong while loading the feed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Status(u16),
    #[error("response is not a JSON array")]
    NotAnArray,
    #[error("parse error: {0}")]
    Decode(String),
    #[error("request timed out after {0}ms")]
    Timeout(u32),
    #[error("request cancelled")]
    Cancelled,
    #[error("failed to fetch posts after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: Box<FeedError> },
}

impl FeedError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FeedError::Cancelled | FeedError::Exhausted { .. })
    }
}
