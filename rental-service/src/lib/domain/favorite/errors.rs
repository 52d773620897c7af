use thiserror::Error;

use crate::domain::offer::models::OfferId;

#[derive(Debug, Clone, Error)]
pub enum FavoriteError {
    #[error("Offer not found: {0}")]
    OfferNotFound(OfferId),

    /// Raised by storage when a concurrent insert won the race.
    #[error("Favorite already exists")]
    AlreadyExists,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for FavoriteError {
    fn from(err: anyhow::Error) -> Self {
        FavoriteError::Unknown(err.to_string())
    }
}
