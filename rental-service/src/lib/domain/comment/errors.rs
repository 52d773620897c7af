use thiserror::Error;

use crate::domain::access::AccessError;
use crate::domain::comment::models::CommentId;
use crate::domain::offer::models::OfferId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentTextError {
    #[error("Comment must be between {min} and {max} characters, got {actual}")]
    Length { min: usize, max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating must be an integer between {min} and {max}, got {actual}")]
    OutOfRange { min: u8, max: u8, actual: i64 },
}

/// Top-level error type for all comment-related operations
#[derive(Debug, Clone, Error)]
pub enum CommentError {
    #[error("Invalid comment ID: {0}")]
    InvalidCommentId(#[from] CommentIdError),

    #[error("Invalid comment text: {0}")]
    InvalidText(#[from] CommentTextError),

    #[error("Invalid rating: {0}")]
    InvalidRating(#[from] RatingError),

    #[error("Comment not found: {0}")]
    NotFound(CommentId),

    #[error("Offer not found: {0}")]
    OfferNotFound(OfferId),

    #[error(transparent)]
    Access(#[from] AccessError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for CommentError {
    fn from(err: anyhow::Error) -> Self {
        CommentError::Unknown(err.to_string())
    }
}
