use thiserror::Error;

use crate::domain::access::AccessError;
use crate::domain::offer::models::OfferId;
use crate::domain::user::models::UserId;

/// Error for OfferId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OfferIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Field-level validation failures for offer input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OfferValidationError {
    #[error("{field} must be between {min} and {max} characters, got {actual}")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("{field} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Offer must have exactly {expected} images, got {actual}")]
    ImageCount { expected: usize, actual: usize },

    #[error("Image reference is empty")]
    EmptyImage,

    #[error("Unknown city '{0}'")]
    UnknownCity(String),

    #[error("Unknown housing type '{0}'")]
    UnknownHousingType(String),

    #[error("Unknown comfort '{0}'")]
    UnknownComfort(String),

    #[error("Invalid {field}: {value}")]
    InvalidCoordinate { field: &'static str, value: f64 },
}

/// Top-level error type for all offer-related operations
#[derive(Debug, Clone, Error)]
pub enum OfferError {
    #[error("Invalid offer ID: {0}")]
    InvalidOfferId(#[from] OfferIdError),

    #[error("Invalid offer: {0}")]
    Invalid(#[from] OfferValidationError),

    #[error("Offer not found: {0}")]
    NotFound(OfferId),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Author {0} of offer not found")]
    AuthorNotFound(UserId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for OfferError {
    fn from(err: anyhow::Error) -> Self {
        OfferError::Unknown(err.to_string())
    }
}
