use async_trait::async_trait;

use crate::domain::offer::errors::OfferError;
use crate::domain::offer::models::City;
use crate::domain::offer::models::CreateOfferCommand;
use crate::domain::offer::models::Offer;
use crate::domain::offer::models::OfferDetails;
use crate::domain::offer::models::OfferId;
use crate::domain::offer::models::OfferStats;
use crate::domain::offer::models::OfferWithFavorite;
use crate::domain::offer::models::UpdateOfferCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for offer domain service operations.
///
/// `viewer` is the resolved identity of the caller, if any, and only
/// affects the favorite flag.
#[async_trait]
pub trait OfferServicePort: Send + Sync + 'static {
    /// Newest offers first.
    async fn list_offers(
        &self,
        viewer: Option<&UserId>,
        limit: usize,
    ) -> Result<Vec<OfferWithFavorite>, OfferError>;

    /// Newest premium offers of a city, at most three.
    async fn list_premium_offers(
        &self,
        city: City,
        viewer: Option<&UserId>,
    ) -> Result<Vec<OfferWithFavorite>, OfferError>;

    /// # Errors
    /// * `NotFound` - Offer does not exist
    async fn get_offer(
        &self,
        id: &OfferId,
        viewer: Option<&UserId>,
    ) -> Result<OfferDetails, OfferError>;

    /// Publish an offer authored by `author`. Derived fields start at zero.
    async fn create_offer(
        &self,
        command: CreateOfferCommand,
        author: &User,
    ) -> Result<OfferDetails, OfferError>;

    /// # Errors
    /// * `NotFound` - Offer does not exist
    /// * `Access` - Caller is anonymous or not the author
    async fn update_offer(
        &self,
        id: &OfferId,
        command: UpdateOfferCommand,
        acting_user: Option<&UserId>,
    ) -> Result<OfferDetails, OfferError>;

    /// Delete an offer together with its comments and favorite markers.
    ///
    /// # Errors
    /// * `NotFound` - Offer does not exist
    /// * `Access` - Caller is anonymous or not the author
    async fn delete_offer(&self, id: &OfferId, acting_user: Option<&UserId>)
        -> Result<(), OfferError>;
}

/// Persistence operations for offers.
#[async_trait]
pub trait OfferRepository: Send + Sync + 'static {
    async fn create(&self, offer: Offer) -> Result<Offer, OfferError>;

    async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, OfferError>;

    /// Newest first, at most `limit`.
    async fn find_all(&self, limit: usize) -> Result<Vec<Offer>, OfferError>;

    /// Premium offers of a city, newest first, at most `limit`.
    async fn find_premium_by_city(&self, city: City, limit: usize)
        -> Result<Vec<Offer>, OfferError>;

    /// Missing IDs are skipped without error.
    async fn find_by_ids(&self, ids: &[OfferId]) -> Result<Vec<Offer>, OfferError>;

    /// Persist editable fields. Derived fields are left untouched.
    ///
    /// # Errors
    /// * `NotFound` - Offer does not exist
    async fn update(&self, offer: Offer) -> Result<Offer, OfferError>;

    /// Persist recomputed rating and comment count.
    ///
    /// # Errors
    /// * `NotFound` - Offer does not exist
    async fn update_stats(&self, id: &OfferId, stats: OfferStats) -> Result<(), OfferError>;

    /// # Errors
    /// * `NotFound` - Offer does not exist
    async fn delete(&self, id: &OfferId) -> Result<(), OfferError>;
}
