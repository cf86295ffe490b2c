//! Feed provider error types.

/// Errors that can occur when talking to the itinerary feed provider.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Client configuration is unusable
    #[error("invalid feed configuration: {message}")]
    InvalidConfig { message: String },
}
