use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::Rating;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::favorite::errors::FavoriteError;
use crate::domain::favorite::models::FavoriteMarker;
use crate::domain::favorite::ports::FavoriteRepository;
use crate::domain::offer::errors::OfferError;
use crate::domain::offer::models::City;
use crate::domain::offer::models::Offer;
use crate::domain::offer::models::OfferId;
use crate::domain::offer::models::OfferStats;
use crate::domain::offer::ports::OfferRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Process-local storage implementing every repository port.
///
/// Mirrors the PostgreSQL schema constraints: unique emails, one favorite
/// per (user, offer) pair, and comments and favorites removed with their
/// offer.
///
/// Lock order is `offers` before `comments` or `favorites`. Writers of
/// dependent rows keep the `offers` guard until they have inserted.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    offers: RwLock<HashMap<OfferId, Offer>>,
    comments: RwLock<HashMap<CommentId, Comment>>,
    favorites: RwLock<HashMap<(UserId, OfferId), FavoriteMarker>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(offers: &mut [Offer]) {
    offers.sort_by(|a, b| b.post_date.cmp(&a.post_date));
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }
}

#[async_trait]
impl OfferRepository for InMemoryStore {
    async fn create(&self, offer: Offer) -> Result<Offer, OfferError> {
        self.offers.write().await.insert(offer.id, offer.clone());
        Ok(offer)
    }

    async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, OfferError> {
        Ok(self.offers.read().await.get(id).cloned())
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<Offer>, OfferError> {
        let mut offers: Vec<Offer> = self.offers.read().await.values().cloned().collect();
        newest_first(&mut offers);
        offers.truncate(limit);
        Ok(offers)
    }

    async fn find_premium_by_city(&self, city: City, limit: usize) -> Result<Vec<Offer>, OfferError> {
        let mut offers: Vec<Offer> = self
            .offers
            .read()
            .await
            .values()
            .filter(|offer| offer.is_premium && offer.city == city)
            .cloned()
            .collect();
        newest_first(&mut offers);
        offers.truncate(limit);
        Ok(offers)
    }

    async fn find_by_ids(&self, ids: &[OfferId]) -> Result<Vec<Offer>, OfferError> {
        let offers = self.offers.read().await;
        Ok(ids.iter().filter_map(|id| offers.get(id).cloned()).collect())
    }

    async fn update(&self, offer: Offer) -> Result<Offer, OfferError> {
        let mut offers = self.offers.write().await;
        let stored = offers.get_mut(&offer.id).ok_or(OfferError::NotFound(offer.id))?;

        let stats = OfferStats {
            rating: stored.rating,
            comments_count: stored.comments_count,
        };
        *stored = offer;
        stored.rating = stats.rating;
        stored.comments_count = stats.comments_count;

        Ok(stored.clone())
    }

    async fn update_stats(&self, id: &OfferId, stats: OfferStats) -> Result<(), OfferError> {
        let mut offers = self.offers.write().await;
        let stored = offers.get_mut(id).ok_or(OfferError::NotFound(*id))?;

        stored.rating = stats.rating;
        stored.comments_count = stats.comments_count;
        Ok(())
    }

    async fn delete(&self, id: &OfferId) -> Result<(), OfferError> {
        let mut offers = self.offers.write().await;
        if offers.remove(id).is_none() {
            return Err(OfferError::NotFound(*id));
        }

        self.comments
            .write()
            .await
            .retain(|_, comment| comment.offer_id != *id);
        self.favorites
            .write()
            .await
            .retain(|(_, offer_id), _| offer_id != id);

        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn create(&self, comment: Comment) -> Result<Comment, CommentError> {
        // Held until the insert so a concurrent offer delete cannot slip in.
        let offers = self.offers.read().await;
        if !offers.contains_key(&comment.offer_id) {
            return Err(CommentError::OfferNotFound(comment.offer_id));
        }

        self.comments
            .write()
            .await
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentError> {
        Ok(self.comments.read().await.get(id).cloned())
    }

    async fn find_by_offer_id(
        &self,
        offer_id: &OfferId,
        limit: usize,
    ) -> Result<Vec<Comment>, CommentError> {
        let mut comments: Vec<Comment> = self
            .comments
            .read()
            .await
            .values()
            .filter(|comment| comment.offer_id == *offer_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.post_date.cmp(&a.post_date));
        comments.truncate(limit);
        Ok(comments)
    }

    async fn ratings_for_offer(&self, offer_id: &OfferId) -> Result<Vec<Rating>, CommentError> {
        Ok(self
            .comments
            .read()
            .await
            .values()
            .filter(|comment| comment.offer_id == *offer_id)
            .map(|comment| comment.rating)
            .collect())
    }

    async fn delete(&self, id: &CommentId) -> Result<(), CommentError> {
        self.comments
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(CommentError::NotFound(*id))
    }

    async fn delete_by_offer_id(&self, offer_id: &OfferId) -> Result<u64, CommentError> {
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|_, comment| comment.offer_id != *offer_id);
        Ok((before - comments.len()) as u64)
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryStore {
    async fn find_by_user_and_offer(
        &self,
        user_id: &UserId,
        offer_id: &OfferId,
    ) -> Result<Option<FavoriteMarker>, FavoriteError> {
        Ok(self
            .favorites
            .read()
            .await
            .get(&(*user_id, *offer_id))
            .cloned())
    }

    async fn create(&self, marker: FavoriteMarker) -> Result<FavoriteMarker, FavoriteError> {
        let offers = self.offers.read().await;
        if !offers.contains_key(&marker.offer_id) {
            return Err(FavoriteError::OfferNotFound(marker.offer_id));
        }

        let mut favorites = self.favorites.write().await;
        let key = (marker.user_id, marker.offer_id);

        if favorites.contains_key(&key) {
            return Err(FavoriteError::AlreadyExists);
        }

        favorites.insert(key, marker.clone());
        Ok(marker)
    }

    async fn delete_by_user_and_offer(
        &self,
        user_id: &UserId,
        offer_id: &OfferId,
    ) -> Result<bool, FavoriteError> {
        Ok(self
            .favorites
            .write()
            .await
            .remove(&(*user_id, *offer_id))
            .is_some())
    }

    async fn offer_ids_for_user(&self, user_id: &UserId) -> Result<Vec<OfferId>, FavoriteError> {
        let favorites = self.favorites.read().await;

        let mut markers: Vec<&FavoriteMarker> = favorites
            .values()
            .filter(|marker| marker.user_id == *user_id)
            .collect();
        markers.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(markers.into_iter().map(|marker| marker.offer_id).collect())
    }

    async fn delete_by_offer_id(&self, offer_id: &OfferId) -> Result<u64, FavoriteError> {
        let mut favorites = self.favorites.write().await;
        let before = favorites.len();
        favorites.retain(|(_, stored_offer_id), _| stored_offer_id != offer_id);
        Ok((before - favorites.len()) as u64)
    }
}
