//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the dashboard backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The session cookie was missing or rejected.
    #[error("not logged in (HTTP {0}); run `lgs login` first")]
    Unauthorized(u16),

    /// The server returned an error status.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The response body did not match the expected contract.
    #[error("invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// The login was refused.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}
