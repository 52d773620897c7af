use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Reason a presented token was rejected.
///
/// Returned as data from [`crate::JwtHandler::verify`]; rejection is an
/// expected outcome for callers, not a failure of the handler.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvalidToken {
    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is malformed")]
    Malformed,
}
