use std::sync::Arc;

use async_trait::async_trait;

use super::errors::FavoriteError;
use super::models::FavoriteMarker;
use super::ports::FavoriteRepository;
use super::ports::FavoriteServicePort;
use crate::domain::offer::models::OfferId;
use crate::domain::offer::models::OfferWithFavorite;
use crate::domain::offer::ports::OfferRepository;
use crate::domain::user::models::UserId;

/// Concrete implementation of FavoriteServicePort.
pub struct FavoriteService<FR, OR>
where
    FR: FavoriteRepository,
    OR: OfferRepository,
{
    favorites: Arc<FR>,
    offers: Arc<OR>,
}

impl<FR, OR> FavoriteService<FR, OR>
where
    FR: FavoriteRepository,
    OR: OfferRepository,
{
    pub fn new(favorites: Arc<FR>, offers: Arc<OR>) -> Self {
        Self { favorites, offers }
    }

    async fn existing(
        &self,
        user_id: &UserId,
        offer_id: &OfferId,
    ) -> Result<FavoriteMarker, FavoriteError> {
        self.favorites
            .find_by_user_and_offer(user_id, offer_id)
            .await?
            .ok_or_else(|| FavoriteError::Unknown("Favorite vanished after conflict".to_string()))
    }
}

#[async_trait]
impl<FR, OR> FavoriteServicePort for FavoriteService<FR, OR>
where
    FR: FavoriteRepository,
    OR: OfferRepository,
{
    async fn add_favorite(
        &self,
        user_id: &UserId,
        offer_id: &OfferId,
    ) -> Result<FavoriteMarker, FavoriteError> {
        self.offers
            .find_by_id(offer_id)
            .await
            .map_err(|e| FavoriteError::DatabaseError(e.to_string()))?
            .ok_or(FavoriteError::OfferNotFound(*offer_id))?;

        if let Some(marker) = self
            .favorites
            .find_by_user_and_offer(user_id, offer_id)
            .await?
        {
            return Ok(marker);
        }

        match self
            .favorites
            .create(FavoriteMarker::new(*user_id, *offer_id))
            .await
        {
            Ok(marker) => {
                tracing::info!(user_id = %user_id, offer_id = %offer_id, "Favorite added");
                Ok(marker)
            }
            // A concurrent request stored the same pair first.
            Err(FavoriteError::AlreadyExists) => self.existing(user_id, offer_id).await,
            Err(e) => Err(e),
        }
    }

    async fn remove_favorite(
        &self,
        user_id: &UserId,
        offer_id: &OfferId,
    ) -> Result<(), FavoriteError> {
        let removed = self
            .favorites
            .delete_by_user_and_offer(user_id, offer_id)
            .await?;

        tracing::debug!(user_id = %user_id, offer_id = %offer_id, removed, "Favorite removed");
        Ok(())
    }

    async fn list_favorites(&self, user_id: &UserId) -> Result<Vec<OfferWithFavorite>, FavoriteError> {
        let ids = self.favorites.offer_ids_for_user(user_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut offers = self
            .offers
            .find_by_ids(&ids)
            .await
            .map_err(|e| FavoriteError::DatabaseError(e.to_string()))?;
        offers.sort_by(|a, b| b.post_date.cmp(&a.post_date));

        Ok(offers
            .into_iter()
            .map(|offer| OfferWithFavorite {
                offer,
                is_favorite: true,
            })
            .collect())
    }
}
