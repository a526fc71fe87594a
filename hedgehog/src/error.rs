use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
