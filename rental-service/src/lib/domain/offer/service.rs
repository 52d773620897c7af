use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::OfferError;
use super::models::City;
use super::models::CreateOfferCommand;
use super::models::Offer;
use super::models::OfferDetails;
use super::models::OfferId;
use super::models::OfferStats;
use super::models::OfferWithFavorite;
use super::models::UpdateOfferCommand;
use super::models::PREMIUM_OFFER_LIMIT;
use super::ports::OfferRepository;
use super::ports::OfferServicePort;
use crate::domain::access::AuthorCheck;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::favorite::ports::FavoriteRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Concrete implementation of OfferServicePort.
///
/// Owns the listing lifecycle, including the cascade to comments and
/// favorites on delete. Generic over repositories for testability.
pub struct OfferService<OR, CR, FR, UR>
where
    OR: OfferRepository,
    CR: CommentRepository,
    FR: FavoriteRepository,
    UR: UserRepository,
{
    offers: Arc<OR>,
    comments: Arc<CR>,
    favorites: Arc<FR>,
    users: Arc<UR>,
}

impl<OR, CR, FR, UR> OfferService<OR, CR, FR, UR>
where
    OR: OfferRepository,
    CR: CommentRepository,
    FR: FavoriteRepository,
    UR: UserRepository,
{
    pub fn new(offers: Arc<OR>, comments: Arc<CR>, favorites: Arc<FR>, users: Arc<UR>) -> Self {
        Self {
            offers,
            comments,
            favorites,
            users,
        }
    }

    async fn load(&self, id: &OfferId) -> Result<Offer, OfferError> {
        self.offers
            .find_by_id(id)
            .await?
            .ok_or(OfferError::NotFound(*id))
    }

    async fn favorite_ids(&self, viewer: Option<&UserId>) -> Result<HashSet<OfferId>, OfferError> {
        let Some(user_id) = viewer else {
            return Ok(HashSet::new());
        };

        self.favorites
            .offer_ids_for_user(user_id)
            .await
            .map(|ids| ids.into_iter().collect())
            .map_err(|e| OfferError::DatabaseError(e.to_string()))
    }

    async fn flag_favorites(
        &self,
        offers: Vec<Offer>,
        viewer: Option<&UserId>,
    ) -> Result<Vec<OfferWithFavorite>, OfferError> {
        let favorite_ids = self.favorite_ids(viewer).await?;

        Ok(offers
            .into_iter()
            .map(|offer| OfferWithFavorite {
                is_favorite: favorite_ids.contains(&offer.id),
                offer,
            })
            .collect())
    }

    async fn details(&self, offer: Offer, viewer: Option<&UserId>) -> Result<OfferDetails, OfferError> {
        let author = self
            .users
            .find_by_id(&offer.author)
            .await
            .map_err(|e| OfferError::DatabaseError(e.to_string()))?
            .ok_or(OfferError::AuthorNotFound(offer.author))?;

        let is_favorite = match viewer {
            Some(user_id) => self
                .favorites
                .find_by_user_and_offer(user_id, &offer.id)
                .await
                .map_err(|e| OfferError::DatabaseError(e.to_string()))?
                .is_some(),
            None => false,
        };

        Ok(OfferDetails {
            offer,
            author,
            is_favorite,
        })
    }
}

#[async_trait]
impl<OR, CR, FR, UR> OfferServicePort for OfferService<OR, CR, FR, UR>
where
    OR: OfferRepository,
    CR: CommentRepository,
    FR: FavoriteRepository,
    UR: UserRepository,
{
    async fn list_offers(
        &self,
        viewer: Option<&UserId>,
        limit: usize,
    ) -> Result<Vec<OfferWithFavorite>, OfferError> {
        let offers = self.offers.find_all(limit).await?;
        self.flag_favorites(offers, viewer).await
    }

    async fn list_premium_offers(
        &self,
        city: City,
        viewer: Option<&UserId>,
    ) -> Result<Vec<OfferWithFavorite>, OfferError> {
        let offers = self
            .offers
            .find_premium_by_city(city, PREMIUM_OFFER_LIMIT)
            .await?;
        self.flag_favorites(offers, viewer).await
    }

    async fn get_offer(
        &self,
        id: &OfferId,
        viewer: Option<&UserId>,
    ) -> Result<OfferDetails, OfferError> {
        let offer = self.load(id).await?;
        self.details(offer, viewer).await
    }

    async fn create_offer(
        &self,
        command: CreateOfferCommand,
        author: &User,
    ) -> Result<OfferDetails, OfferError> {
        let offer = Offer {
            id: OfferId::new(),
            title: command.title,
            description: command.description,
            post_date: Utc::now(),
            city: command.city,
            preview_image: command.preview_image,
            images: command.images,
            is_premium: command.is_premium,
            rating: OfferStats::EMPTY.rating,
            housing_type: command.housing_type,
            rooms: command.rooms,
            max_guests: command.max_guests,
            price: command.price,
            comforts: command.comforts,
            author: author.id,
            comments_count: OfferStats::EMPTY.comments_count,
            location: command.location,
        };

        let created = self.offers.create(offer).await?;
        tracing::info!(offer_id = %created.id, author_id = %author.id, "Offer created");

        Ok(OfferDetails {
            offer: created,
            author: author.clone(),
            is_favorite: false,
        })
    }

    async fn update_offer(
        &self,
        id: &OfferId,
        command: UpdateOfferCommand,
        acting_user: Option<&UserId>,
    ) -> Result<OfferDetails, OfferError> {
        let mut offer = self.load(id).await?.authorized_for(acting_user)?;

        command.apply_to(&mut offer);

        let updated = self.offers.update(offer).await?;
        tracing::info!(offer_id = %updated.id, "Offer updated");

        self.details(updated, acting_user).await
    }

    async fn delete_offer(
        &self,
        id: &OfferId,
        acting_user: Option<&UserId>,
    ) -> Result<(), OfferError> {
        let offer = self.load(id).await?.authorized_for(acting_user)?;

        let removed_comments = self
            .comments
            .delete_by_offer_id(&offer.id)
            .await
            .map_err(|e| OfferError::DatabaseError(e.to_string()))?;
        let removed_favorites = self
            .favorites
            .delete_by_offer_id(&offer.id)
            .await
            .map_err(|e| OfferError::DatabaseError(e.to_string()))?;

        self.offers.delete(&offer.id).await?;

        tracing::info!(
            offer_id = %offer.id,
            removed_comments,
            removed_favorites,
            "Offer deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::Sequence;

    use super::*;
    use crate::domain::access::AccessError;
    use crate::domain::comment::errors::CommentError;
    use crate::domain::comment::models::Comment;
    use crate::domain::comment::models::CommentId;
    use crate::domain::comment::models::Rating;
    use crate::domain::favorite::errors::FavoriteError;
    use crate::domain::favorite::models::FavoriteMarker;
    use crate::domain::offer::models::Comforts;
    use crate::domain::offer::models::HousingType;
    use crate::domain::offer::models::ImageRef;
    use crate::domain::offer::models::Location;
    use crate::domain::offer::models::MaxGuests;
    use crate::domain::offer::models::OfferDescription;
    use crate::domain::offer::models::OfferImages;
    use crate::domain::offer::models::OfferTitle;
    use crate::domain::offer::models::Price;
    use crate::domain::offer::models::Rooms;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserName;
    use crate::domain::user::models::UserType;

    mock! {
        pub TestOfferRepository {}

        #[async_trait]
        impl OfferRepository for TestOfferRepository {
            async fn create(&self, offer: Offer) -> Result<Offer, OfferError>;
            async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, OfferError>;
            async fn find_all(&self, limit: usize) -> Result<Vec<Offer>, OfferError>;
            async fn find_premium_by_city(&self, city: City, limit: usize) -> Result<Vec<Offer>, OfferError>;
            async fn find_by_ids(&self, ids: &[OfferId]) -> Result<Vec<Offer>, OfferError>;
            async fn update(&self, offer: Offer) -> Result<Offer, OfferError>;
            async fn update_stats(&self, id: &OfferId, stats: OfferStats) -> Result<(), OfferError>;
            async fn delete(&self, id: &OfferId) -> Result<(), OfferError>;
        }
    }

    mock! {
        pub TestCommentRepository {}

        #[async_trait]
        impl CommentRepository for TestCommentRepository {
            async fn create(&self, comment: Comment) -> Result<Comment, CommentError>;
            async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentError>;
            async fn find_by_offer_id(&self, offer_id: &OfferId, limit: usize) -> Result<Vec<Comment>, CommentError>;
            async fn ratings_for_offer(&self, offer_id: &OfferId) -> Result<Vec<Rating>, CommentError>;
            async fn delete(&self, id: &CommentId) -> Result<(), CommentError>;
            async fn delete_by_offer_id(&self, offer_id: &OfferId) -> Result<u64, CommentError>;
        }
    }

    mock! {
        pub TestFavoriteRepository {}

        #[async_trait]
        impl FavoriteRepository for TestFavoriteRepository {
            async fn find_by_user_and_offer(&self, user_id: &UserId, offer_id: &OfferId) -> Result<Option<FavoriteMarker>, FavoriteError>;
            async fn create(&self, marker: FavoriteMarker) -> Result<FavoriteMarker, FavoriteError>;
            async fn delete_by_user_and_offer(&self, user_id: &UserId, offer_id: &OfferId) -> Result<bool, FavoriteError>;
            async fn offer_ids_for_user(&self, user_id: &UserId) -> Result<Vec<OfferId>, FavoriteError>;
            async fn delete_by_offer_id(&self, offer_id: &OfferId) -> Result<u64, FavoriteError>;
        }
    }

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
        }
    }

    fn user(id: UserId) -> User {
        User {
            id,
            name: UserName::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            avatar: None,
            user_type: UserType::Pro,
            password_hash: "$argon2id$hash".to_string(),
            created_at: Utc::now(),
        }
    }

    fn command() -> CreateOfferCommand {
        CreateOfferCommand {
            title: OfferTitle::new("Canal view loft".to_string()).unwrap(),
            description: OfferDescription::new("Bright loft right on the canal ring.".to_string())
                .unwrap(),
            city: City::Amsterdam,
            preview_image: ImageRef::new("preview.jpg".to_string()).unwrap(),
            images: OfferImages::new(vec!["img.jpg".to_string(); 6]).unwrap(),
            is_premium: true,
            housing_type: HousingType::Apartment,
            rooms: Rooms::new(2).unwrap(),
            max_guests: MaxGuests::new(4).unwrap(),
            price: Price::new(250).unwrap(),
            comforts: Comforts::parse(&["Fridge", "Washer"]).unwrap(),
            location: Location::new(52.37, 4.89).unwrap(),
        }
    }

    fn offer(author: UserId) -> Offer {
        let command = command();
        Offer {
            id: OfferId::new(),
            title: command.title,
            description: command.description,
            post_date: Utc::now(),
            city: command.city,
            preview_image: command.preview_image,
            images: command.images,
            is_premium: command.is_premium,
            rating: 3.0,
            housing_type: command.housing_type,
            rooms: command.rooms,
            max_guests: command.max_guests,
            price: command.price,
            comforts: command.comforts,
            author,
            comments_count: 2,
            location: command.location,
        }
    }

    fn service(
        offers: MockTestOfferRepository,
        comments: MockTestCommentRepository,
        favorites: MockTestFavoriteRepository,
        users: MockTestUserRepository,
    ) -> OfferService<
        MockTestOfferRepository,
        MockTestCommentRepository,
        MockTestFavoriteRepository,
        MockTestUserRepository,
    > {
        OfferService::new(
            Arc::new(offers),
            Arc::new(comments),
            Arc::new(favorites),
            Arc::new(users),
        )
    }

    #[tokio::test]
    async fn test_create_offer_starts_with_empty_stats() {
        let mut offers = MockTestOfferRepository::new();
        let author = user(UserId::new());
        let author_id = author.id;

        offers
            .expect_create()
            .withf(move |offer| {
                offer.rating == 0.0 && offer.comments_count == 0 && offer.author == author_id
            })
            .times(1)
            .returning(|offer| Ok(offer));

        let service = service(
            offers,
            MockTestCommentRepository::new(),
            MockTestFavoriteRepository::new(),
            MockTestUserRepository::new(),
        );

        let details = service.create_offer(command(), &author).await.unwrap();
        assert_eq!(details.author.id, author_id);
        assert!(!details.is_favorite);
    }

    #[tokio::test]
    async fn test_list_offers_flags_viewer_favorites() {
        let mut offers = MockTestOfferRepository::new();
        let mut favorites = MockTestFavoriteRepository::new();
        let viewer = UserId::new();

        let favorite = offer(UserId::new());
        let other = offer(UserId::new());
        let favorite_id = favorite.id;
        let listed = vec![favorite, other];

        offers
            .expect_find_all()
            .withf(|limit| *limit == 60)
            .times(1)
            .returning(move |_| Ok(listed.clone()));
        favorites
            .expect_offer_ids_for_user()
            .withf(move |user_id| *user_id == viewer)
            .times(1)
            .returning(move |_| Ok(vec![favorite_id]));

        let service = service(
            offers,
            MockTestCommentRepository::new(),
            favorites,
            MockTestUserRepository::new(),
        );

        let listed = service.list_offers(Some(&viewer), 60).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].is_favorite);
        assert!(!listed[1].is_favorite);
    }

    #[tokio::test]
    async fn test_list_offers_anonymous_has_no_favorites() {
        let mut offers = MockTestOfferRepository::new();
        let mut favorites = MockTestFavoriteRepository::new();
        let listed = vec![offer(UserId::new())];

        offers
            .expect_find_all()
            .times(1)
            .returning(move |_| Ok(listed.clone()));
        favorites.expect_offer_ids_for_user().times(0);

        let service = service(
            offers,
            MockTestCommentRepository::new(),
            favorites,
            MockTestUserRepository::new(),
        );

        let listed = service.list_offers(None, 60).await.unwrap();
        assert!(listed.iter().all(|item| !item.is_favorite));
    }

    #[tokio::test]
    async fn test_update_by_non_author_is_forbidden() {
        let mut offers = MockTestOfferRepository::new();
        let stored = offer(UserId::new());
        let offer_id = stored.id;

        offers
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        offers.expect_update().times(0);

        let service = service(
            offers,
            MockTestCommentRepository::new(),
            MockTestFavoriteRepository::new(),
            MockTestUserRepository::new(),
        );

        let result = service
            .update_offer(&offer_id, UpdateOfferCommand::default(), Some(&UserId::new()))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            OfferError::Access(AccessError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_update_by_author_applies_changes() {
        let mut offers = MockTestOfferRepository::new();
        let mut users = MockTestUserRepository::new();
        let mut favorites = MockTestFavoriteRepository::new();
        let author = user(UserId::new());
        let author_id = author.id;
        let stored = offer(author_id);
        let offer_id = stored.id;

        offers
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        offers
            .expect_update()
            .withf(|offer| offer.price.value() == 999 && offer.rating == 3.0)
            .times(1)
            .returning(|offer| Ok(offer));
        users
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(author.clone())));
        favorites
            .expect_find_by_user_and_offer()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = service(offers, MockTestCommentRepository::new(), favorites, users);

        let command = UpdateOfferCommand {
            price: Some(Price::new(999).unwrap()),
            ..UpdateOfferCommand::default()
        };

        let details = service
            .update_offer(&offer_id, command, Some(&author_id))
            .await
            .unwrap();
        assert_eq!(details.offer.price.value(), 999);
        assert_eq!(details.offer.comments_count, 2);
    }

    #[tokio::test]
    async fn test_delete_without_identity_is_unauthenticated() {
        let mut offers = MockTestOfferRepository::new();
        let stored = offer(UserId::new());
        let offer_id = stored.id;

        offers
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        offers.expect_delete().times(0);

        let service = service(
            offers,
            MockTestCommentRepository::new(),
            MockTestFavoriteRepository::new(),
            MockTestUserRepository::new(),
        );

        let result = service.delete_offer(&offer_id, None).await;
        assert!(matches!(
            result.unwrap_err(),
            OfferError::Access(AccessError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades_before_removing_offer() {
        let mut offers = MockTestOfferRepository::new();
        let mut comments = MockTestCommentRepository::new();
        let mut favorites = MockTestFavoriteRepository::new();
        let mut sequence = Sequence::new();
        let author_id = UserId::new();
        let stored = offer(author_id);
        let offer_id = stored.id;

        offers
            .expect_find_by_id()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(move |_| Ok(Some(stored.clone())));
        comments
            .expect_delete_by_offer_id()
            .withf(move |id| *id == offer_id)
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(2));
        favorites
            .expect_delete_by_offer_id()
            .withf(move |id| *id == offer_id)
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(1));
        offers
            .expect_delete()
            .withf(move |id| *id == offer_id)
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(()));

        let service = service(offers, comments, favorites, MockTestUserRepository::new());

        service
            .delete_offer(&offer_id, Some(&author_id))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_missing_offer_is_not_found() {
        let mut offers = MockTestOfferRepository::new();
        offers.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = service(
            offers,
            MockTestCommentRepository::new(),
            MockTestFavoriteRepository::new(),
            MockTestUserRepository::new(),
        );

        let result = service.get_offer(&OfferId::new(), None).await;
        assert!(matches!(result.unwrap_err(), OfferError::NotFound(_)));
    }
}
