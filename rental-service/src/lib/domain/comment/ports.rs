use async_trait::async_trait;

use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::CommentWithAuthor;
use crate::domain::comment::models::CreateCommentCommand;
use crate::domain::comment::models::Rating;
use crate::domain::offer::models::OfferId;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for comment domain service operations.
#[async_trait]
pub trait CommentServicePort: Send + Sync + 'static {
    /// Most recent comments of an offer, newest first.
    ///
    /// # Errors
    /// * `OfferNotFound` - Offer does not exist
    async fn list_comments(&self, offer_id: &OfferId) -> Result<Vec<CommentWithAuthor>, CommentError>;

    /// Post a comment and refresh the offer's rating and comment count.
    ///
    /// # Errors
    /// * `OfferNotFound` - Offer does not exist
    async fn create_comment(
        &self,
        offer_id: &OfferId,
        command: CreateCommentCommand,
        author: &User,
    ) -> Result<CommentWithAuthor, CommentError>;

    /// Delete a comment and refresh the offer's rating and comment count.
    ///
    /// # Errors
    /// * `NotFound` - Comment does not exist on this offer
    /// * `Access` - Caller is anonymous or not the comment's author
    async fn delete_comment(
        &self,
        offer_id: &OfferId,
        comment_id: &CommentId,
        acting_user: Option<&UserId>,
    ) -> Result<(), CommentError>;
}

/// Persistence operations for comments.
#[async_trait]
pub trait CommentRepository: Send + Sync + 'static {
    async fn create(&self, comment: Comment) -> Result<Comment, CommentError>;

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentError>;

    /// Comments of an offer, newest first, at most `limit`.
    async fn find_by_offer_id(
        &self,
        offer_id: &OfferId,
        limit: usize,
    ) -> Result<Vec<Comment>, CommentError>;

    /// Every rating currently attached to an offer.
    async fn ratings_for_offer(&self, offer_id: &OfferId) -> Result<Vec<Rating>, CommentError>;

    /// # Errors
    /// * `NotFound` - Comment does not exist
    async fn delete(&self, id: &CommentId) -> Result<(), CommentError>;

    /// Remove all comments of an offer.
    ///
    /// # Returns
    /// Number of comments removed
    async fn delete_by_offer_id(&self, offer_id: &OfferId) -> Result<u64, CommentError>;
}
