use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Top-level error for registration, login and identity resolution.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Both cases carry the same message.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// A token was presented but is malformed, forged, expired or names a
    /// user that no longer exists.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Authentication required")]
    MissingCredentials,

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(format!("{:#}", err))
    }
}
