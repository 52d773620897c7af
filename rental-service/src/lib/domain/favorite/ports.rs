use async_trait::async_trait;

use crate::domain::favorite::errors::FavoriteError;
use crate::domain::favorite::models::FavoriteMarker;
use crate::domain::offer::models::OfferId;
use crate::domain::offer::models::OfferWithFavorite;
use crate::domain::user::models::UserId;

/// Port for favorite operations.
#[async_trait]
pub trait FavoriteServicePort: Send + Sync + 'static {
    /// Mark an offer as favorite. Adding an existing pair returns the
    /// existing marker.
    ///
    /// # Errors
    /// * `OfferNotFound` - Offer does not exist
    async fn add_favorite(
        &self,
        user_id: &UserId,
        offer_id: &OfferId,
    ) -> Result<FavoriteMarker, FavoriteError>;

    /// Unmark an offer. Unmarking a non-favorite is a no-op.
    async fn remove_favorite(&self, user_id: &UserId, offer_id: &OfferId)
        -> Result<(), FavoriteError>;

    /// The user's favorite offers, newest first.
    async fn list_favorites(&self, user_id: &UserId) -> Result<Vec<OfferWithFavorite>, FavoriteError>;
}

/// Persistence operations for favorite markers.
#[async_trait]
pub trait FavoriteRepository: Send + Sync + 'static {
    async fn find_by_user_and_offer(
        &self,
        user_id: &UserId,
        offer_id: &OfferId,
    ) -> Result<Option<FavoriteMarker>, FavoriteError>;

    /// # Errors
    /// * `AlreadyExists` - The pair is already stored
    async fn create(&self, marker: FavoriteMarker) -> Result<FavoriteMarker, FavoriteError>;

    /// # Returns
    /// Whether a marker was removed
    async fn delete_by_user_and_offer(
        &self,
        user_id: &UserId,
        offer_id: &OfferId,
    ) -> Result<bool, FavoriteError>;

    async fn offer_ids_for_user(&self, user_id: &UserId) -> Result<Vec<OfferId>, FavoriteError>;

    /// Remove every marker pointing at an offer.
    ///
    /// # Returns
    /// Number of markers removed
    async fn delete_by_offer_id(&self, offer_id: &OfferId) -> Result<u64, FavoriteError>;
}
