//! Error types for the session module.

use thiserror::Error;

/// Errors a session can report.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session could not produce an anti-forgery token.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The request never got a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The platform answered with an error.
    #[error("Platform error ({status}): {message}")]
    Platform { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}
