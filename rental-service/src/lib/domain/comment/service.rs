use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::CommentError;
use super::models::Comment;
use super::models::CommentId;
use super::models::CommentWithAuthor;
use super::models::CreateCommentCommand;
use super::models::COMMENT_LIST_LIMIT;
use super::ports::CommentRepository;
use super::ports::CommentServicePort;
use crate::domain::access::AuthorCheck;
use crate::domain::offer::models::OfferId;
use crate::domain::offer::ports::OfferRepository;
use crate::domain::rating::aggregator::RatingAggregator;
use crate::domain::rating::ports::StaleAggregateReporter;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Concrete implementation of CommentServicePort.
///
/// Every successful create or delete is followed by a synchronous refresh of
/// the offer's rating and comment count. A failed refresh is reported and
/// does not undo the comment change.
pub struct CommentService<CR, OR, UR, SR>
where
    CR: CommentRepository,
    OR: OfferRepository,
    UR: UserRepository,
    SR: StaleAggregateReporter,
{
    comments: Arc<CR>,
    offers: Arc<OR>,
    users: Arc<UR>,
    aggregator: RatingAggregator<CR, OR>,
    stale_reporter: Arc<SR>,
}

impl<CR, OR, UR, SR> CommentService<CR, OR, UR, SR>
where
    CR: CommentRepository,
    OR: OfferRepository,
    UR: UserRepository,
    SR: StaleAggregateReporter,
{
    pub fn new(
        comments: Arc<CR>,
        offers: Arc<OR>,
        users: Arc<UR>,
        stale_reporter: Arc<SR>,
    ) -> Self {
        let aggregator = RatingAggregator::new(Arc::clone(&comments), Arc::clone(&offers));
        Self {
            comments,
            offers,
            users,
            aggregator,
            stale_reporter,
        }
    }

    async fn ensure_offer_exists(&self, offer_id: &OfferId) -> Result<(), CommentError> {
        self.offers
            .find_by_id(offer_id)
            .await
            .map_err(|e| CommentError::DatabaseError(e.to_string()))?
            .map(|_| ())
            .ok_or(CommentError::OfferNotFound(*offer_id))
    }

    async fn refresh_offer_stats(&self, offer_id: &OfferId) {
        if let Err(error) = self.aggregator.recompute(offer_id).await {
            self.stale_reporter.report_stale(offer_id, &error);
        }
    }

    async fn authors_by_id(&self, comments: &[Comment]) -> Result<HashMap<UserId, User>, CommentError> {
        let mut ids: Vec<UserId> = comments.iter().map(|c| c.author).collect();
        ids.sort_by_key(|id| id.0);
        ids.dedup();

        let users = self
            .users
            .find_by_ids(&ids)
            .await
            .map_err(|e| CommentError::DatabaseError(e.to_string()))?;

        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }
}

#[async_trait]
impl<CR, OR, UR, SR> CommentServicePort for CommentService<CR, OR, UR, SR>
where
    CR: CommentRepository,
    OR: OfferRepository,
    UR: UserRepository,
    SR: StaleAggregateReporter,
{
    async fn list_comments(&self, offer_id: &OfferId) -> Result<Vec<CommentWithAuthor>, CommentError> {
        self.ensure_offer_exists(offer_id).await?;

        let comments = self
            .comments
            .find_by_offer_id(offer_id, COMMENT_LIST_LIMIT)
            .await?;
        let authors = self.authors_by_id(&comments).await?;

        let mut listed = Vec::with_capacity(comments.len());
        for comment in comments {
            match authors.get(&comment.author) {
                Some(author) => listed.push(CommentWithAuthor {
                    author: author.clone(),
                    comment,
                }),
                None => {
                    tracing::warn!(
                        comment_id = %comment.id,
                        author_id = %comment.author,
                        "Skipping comment whose author no longer exists"
                    );
                }
            }
        }

        Ok(listed)
    }

    async fn create_comment(
        &self,
        offer_id: &OfferId,
        command: CreateCommentCommand,
        author: &User,
    ) -> Result<CommentWithAuthor, CommentError> {
        self.ensure_offer_exists(offer_id).await?;

        let comment = Comment {
            id: CommentId::new(),
            offer_id: *offer_id,
            author: author.id,
            text: command.text,
            rating: command.rating,
            post_date: Utc::now(),
        };

        let created = self.comments.create(comment).await?;
        tracing::info!(
            comment_id = %created.id,
            offer_id = %offer_id,
            rating = created.rating.value(),
            "Comment created"
        );

        self.refresh_offer_stats(offer_id).await;

        Ok(CommentWithAuthor {
            comment: created,
            author: author.clone(),
        })
    }

    async fn delete_comment(
        &self,
        offer_id: &OfferId,
        comment_id: &CommentId,
        acting_user: Option<&UserId>,
    ) -> Result<(), CommentError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|comment| comment.offer_id == *offer_id)
            .ok_or(CommentError::NotFound(*comment_id))?
            .authorized_for(acting_user)?;

        self.comments.delete(&comment.id).await?;
        tracing::info!(comment_id = %comment.id, offer_id = %offer_id, "Comment deleted");

        self.refresh_offer_stats(offer_id).await;

        Ok(())
    }
}
