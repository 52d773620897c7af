use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::CommentText;
use crate::domain::comment::models::Rating;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::offer::models::OfferId;
use crate::domain::user::models::UserId;

pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_comment(row: &PgRow) -> Result<Comment, CommentError> {
        let rating: i16 = row.try_get("rating").map_err(database_error)?;

        Ok(Comment {
            id: CommentId(row.try_get("id").map_err(database_error)?),
            offer_id: OfferId(row.try_get("offer_id").map_err(database_error)?),
            author: UserId(row.try_get("author_id").map_err(database_error)?),
            text: CommentText::new(row.try_get("text").map_err(database_error)?)?,
            rating: Rating::new(i64::from(rating))?,
            post_date: row.try_get("post_date").map_err(database_error)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> CommentError {
    CommentError::DatabaseError(e.to_string())
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, CommentError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, offer_id, author_id, text, rating, post_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.id.0)
        .bind(comment.offer_id.0)
        .bind(comment.author.0)
        .bind(comment.text.as_str())
        .bind(i16::from(comment.rating.value()))
        .bind(comment.post_date)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint() == Some("comments_offer_id_fkey") {
                    return CommentError::OfferNotFound(comment.offer_id);
                }
            }
            database_error(e)
        })?;

        Ok(comment)
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentError> {
        let row = sqlx::query(
            r#"
            SELECT id, offer_id, author_id, text, rating, post_date
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_comment).transpose()
    }

    async fn find_by_offer_id(
        &self,
        offer_id: &OfferId,
        limit: usize,
    ) -> Result<Vec<Comment>, CommentError> {
        let rows = sqlx::query(
            r#"
            SELECT id, offer_id, author_id, text, rating, post_date
            FROM comments
            WHERE offer_id = $1
            ORDER BY post_date DESC
            LIMIT $2
            "#,
        )
        .bind(offer_id.0)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_comment).collect()
    }

    async fn ratings_for_offer(&self, offer_id: &OfferId) -> Result<Vec<Rating>, CommentError> {
        let rows = sqlx::query("SELECT rating FROM comments WHERE offer_id = $1")
            .bind(offer_id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter()
            .map(|row| {
                let rating: i16 = row.try_get("rating").map_err(database_error)?;
                Ok(Rating::new(i64::from(rating))?)
            })
            .collect()
    }

    async fn delete(&self, id: &CommentId) -> Result<(), CommentError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(CommentError::NotFound(*id));
        }

        Ok(())
    }

    async fn delete_by_offer_id(&self, offer_id: &OfferId) -> Result<u64, CommentError> {
        let result = sqlx::query("DELETE FROM comments WHERE offer_id = $1")
            .bind(offer_id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
