use std::sync::Arc;

use crate::domain::comment::models::Rating;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::offer::models::OfferId;
use crate::domain::offer::models::OfferStats;
use crate::domain::offer::ports::OfferRepository;
use crate::domain::rating::errors::AggregationError;

/// Derive an offer's rating and comment count from its ratings.
///
/// The rating is the arithmetic mean rounded half-up to one decimal place,
/// or `0.0` when there are no ratings. Integer arithmetic keeps the
/// rounding exact: `3.25` becomes `3.3`, `3.45` becomes `3.5`.
pub fn compute_offer_stats(ratings: &[Rating]) -> OfferStats {
    let count = ratings.len() as u64;
    if count == 0 {
        return OfferStats::EMPTY;
    }

    let sum: u64 = ratings.iter().map(|r| u64::from(r.value())).sum();
    let tenths = (20 * sum + count) / (2 * count);

    OfferStats {
        rating: tenths as f64 / 10.0,
        comments_count: u32::try_from(count).unwrap_or(u32::MAX),
    }
}

/// Recomputes derived offer fields from the current comment set.
///
/// Recomputation reads the full set every time, so running it twice in a
/// row leaves the same values.
pub struct RatingAggregator<CR, OR>
where
    CR: CommentRepository,
    OR: OfferRepository,
{
    comments: Arc<CR>,
    offers: Arc<OR>,
}

impl<CR, OR> RatingAggregator<CR, OR>
where
    CR: CommentRepository,
    OR: OfferRepository,
{
    pub fn new(comments: Arc<CR>, offers: Arc<OR>) -> Self {
        Self { comments, offers }
    }

    /// Read every rating of the offer and persist the derived stats.
    ///
    /// # Errors
    /// * `ReadRatings` - Comment storage failed
    /// * `StoreStats` - Offer storage failed or the offer is gone
    pub async fn recompute(&self, offer_id: &OfferId) -> Result<OfferStats, AggregationError> {
        let ratings = self.comments.ratings_for_offer(offer_id).await?;
        let stats = compute_offer_stats(&ratings);

        self.offers.update_stats(offer_id, stats).await?;

        tracing::debug!(
            offer_id = %offer_id,
            rating = stats.rating,
            comments_count = stats.comments_count,
            "Offer stats recomputed"
        );

        Ok(stats)
    }
}
