//! Error types for the client.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to an Insights server.
///
/// The client performs no retries and no backoff; every transport-boundary
/// failure is returned as one of these variants and retry policy stays
/// with the caller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The credential exchange failed: non-success status or a response
    /// body the token could not be read from.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Sending the request or reading the response failed below the HTTP
    /// status level (connect, TLS, timeout, body I/O).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("server returned status {code}")]
    Status { code: u16 },
}
