use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::favorite::errors::FavoriteError;
use crate::domain::favorite::models::FavoriteMarker;
use crate::domain::favorite::ports::FavoriteRepository;
use crate::domain::offer::models::OfferId;
use crate::domain::user::models::UserId;

pub struct PostgresFavoriteRepository {
    pool: PgPool,
}

impl PostgresFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> FavoriteError {
    FavoriteError::DatabaseError(e.to_string())
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn find_by_user_and_offer(
        &self,
        user_id: &UserId,
        offer_id: &OfferId,
    ) -> Result<Option<FavoriteMarker>, FavoriteError> {
        let row = sqlx::query(
            r#"
            SELECT created_at
            FROM favorites
            WHERE user_id = $1 AND offer_id = $2
            "#,
        )
        .bind(user_id.0)
        .bind(offer_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(FavoriteMarker {
            user_id: *user_id,
            offer_id: *offer_id,
            created_at: row.try_get("created_at").map_err(database_error)?,
        }))
    }

    async fn create(&self, marker: FavoriteMarker) -> Result<FavoriteMarker, FavoriteError> {
        sqlx::query(
            r#"
            INSERT INTO favorites (user_id, offer_id, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(marker.user_id.0)
        .bind(marker.offer_id.0)
        .bind(marker.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("favorites_pkey") {
                    return FavoriteError::AlreadyExists;
                }
                if db_err.constraint() == Some("favorites_offer_id_fkey") {
                    return FavoriteError::OfferNotFound(marker.offer_id);
                }
            }
            database_error(e)
        })?;

        Ok(marker)
    }

    async fn delete_by_user_and_offer(
        &self,
        user_id: &UserId,
        offer_id: &OfferId,
    ) -> Result<bool, FavoriteError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND offer_id = $2")
            .bind(user_id.0)
            .bind(offer_id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn offer_ids_for_user(&self, user_id: &UserId) -> Result<Vec<OfferId>, FavoriteError> {
        let rows = sqlx::query(
            r#"
            SELECT offer_id
            FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter()
            .map(|row| {
                row.try_get("offer_id")
                    .map(OfferId)
                    .map_err(database_error)
            })
            .collect()
    }

    async fn delete_by_offer_id(&self, offer_id: &OfferId) -> Result<u64, FavoriteError> {
        let result = sqlx::query("DELETE FROM favorites WHERE offer_id = $1")
            .bind(offer_id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
