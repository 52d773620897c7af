use thiserror::Error;

use crate::domain::comment::errors::CommentError;
use crate::domain::offer::errors::OfferError;

/// Failure while refreshing an offer's derived fields.
///
/// Never surfaced to clients. The triggering comment operation has already
/// been committed when this occurs.
#[derive(Debug, Clone, Error)]
pub enum AggregationError {
    #[error("Failed to read ratings: {0}")]
    ReadRatings(#[from] CommentError),

    #[error("Failed to store offer stats: {0}")]
    StoreStats(#[from] OfferError),
}
