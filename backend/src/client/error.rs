//! Client-side error type

use thiserror::Error;

/// Errors raised by [`ApiClient`](super::ApiClient) and [`ChatSession`](super::ChatSession)
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `success: false`
    #[error("API error ({status}): {error}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Error text from the envelope
        error: String,
    },

    /// The response body was not a valid envelope
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A successful envelope arrived without the expected data
    #[error("Response did not contain data")]
    MissingData,

    /// A chat message id is not part of the session transcript
    #[error("Message not found: {0}")]
    UnknownMessage(String),
}
