use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::offer::errors::OfferError;
use crate::domain::offer::models::City;
use crate::domain::offer::models::Comforts;
use crate::domain::offer::models::ImageRef;
use crate::domain::offer::models::Location;
use crate::domain::offer::models::MaxGuests;
use crate::domain::offer::models::Offer;
use crate::domain::offer::models::OfferDescription;
use crate::domain::offer::models::OfferId;
use crate::domain::offer::models::OfferImages;
use crate::domain::offer::models::OfferStats;
use crate::domain::offer::models::OfferTitle;
use crate::domain::offer::models::Price;
use crate::domain::offer::models::Rooms;
use crate::domain::offer::ports::OfferRepository;
use crate::domain::user::models::UserId;

const OFFER_COLUMNS: &str = "id, title, description, post_date, city, preview_image, images, \
     is_premium, rating, housing_type, rooms, max_guests, price, comforts, author_id, \
     comments_count, latitude, longitude";

pub struct PostgresOfferRepository {
    pool: PgPool,
}

impl PostgresOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_offer(row: &PgRow) -> Result<Offer, OfferError> {
        let city: String = row.try_get("city").map_err(database_error)?;
        let housing_type: String = row.try_get("housing_type").map_err(database_error)?;
        let rooms: i16 = row.try_get("rooms").map_err(database_error)?;
        let max_guests: i16 = row.try_get("max_guests").map_err(database_error)?;
        let price: i32 = row.try_get("price").map_err(database_error)?;
        let comforts: Vec<String> = row.try_get("comforts").map_err(database_error)?;
        let comments_count: i32 = row.try_get("comments_count").map_err(database_error)?;

        Ok(Offer {
            id: OfferId(row.try_get("id").map_err(database_error)?),
            title: OfferTitle::new(row.try_get("title").map_err(database_error)?)?,
            description: OfferDescription::new(row.try_get("description").map_err(database_error)?)?,
            post_date: row.try_get("post_date").map_err(database_error)?,
            city: city.parse()?,
            preview_image: ImageRef::new(row.try_get("preview_image").map_err(database_error)?)?,
            images: OfferImages::new(row.try_get("images").map_err(database_error)?)?,
            is_premium: row.try_get("is_premium").map_err(database_error)?,
            rating: row.try_get("rating").map_err(database_error)?,
            housing_type: housing_type.parse()?,
            rooms: Rooms::new(i64::from(rooms))?,
            max_guests: MaxGuests::new(i64::from(max_guests))?,
            price: Price::new(i64::from(price))?,
            comforts: Comforts::parse(&comforts)?,
            author: UserId(row.try_get("author_id").map_err(database_error)?),
            comments_count: u32::try_from(comments_count).unwrap_or_default(),
            location: Location::new(
                row.try_get("latitude").map_err(database_error)?,
                row.try_get("longitude").map_err(database_error)?,
            )?,
        })
    }
}

fn database_error(e: sqlx::Error) -> OfferError {
    OfferError::DatabaseError(e.to_string())
}

fn limit_param(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl OfferRepository for PostgresOfferRepository {
    async fn create(&self, offer: Offer) -> Result<Offer, OfferError> {
        sqlx::query(
            r#"
            INSERT INTO offers (
                id, title, description, post_date, city, preview_image, images,
                is_premium, rating, housing_type, rooms, max_guests, price, comforts,
                author_id, comments_count, latitude, longitude
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(offer.id.0)
        .bind(offer.title.as_str())
        .bind(offer.description.as_str())
        .bind(offer.post_date)
        .bind(offer.city.as_str())
        .bind(offer.preview_image.as_str())
        .bind(offer.images.to_strings())
        .bind(offer.is_premium)
        .bind(offer.rating)
        .bind(offer.housing_type.as_str())
        .bind(i16::from(offer.rooms.value()))
        .bind(i16::from(offer.max_guests.value()))
        .bind(offer.price.value() as i32)
        .bind(offer.comforts.to_strings())
        .bind(offer.author.0)
        .bind(offer.comments_count as i32)
        .bind(offer.location.latitude())
        .bind(offer.location.longitude())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(offer)
    }

    async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, OfferError> {
        let row = sqlx::query(&format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(Self::row_to_offer).transpose()
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<Offer>, OfferError> {
        let rows = sqlx::query(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers ORDER BY post_date DESC LIMIT $1"
        ))
        .bind(limit_param(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_offer).collect()
    }

    async fn find_premium_by_city(&self, city: City, limit: usize) -> Result<Vec<Offer>, OfferError> {
        let rows = sqlx::query(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers \
             WHERE city = $1 AND is_premium \
             ORDER BY post_date DESC LIMIT $2"
        ))
        .bind(city.as_str())
        .bind(limit_param(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_offer).collect()
    }

    async fn find_by_ids(&self, ids: &[OfferId]) -> Result<Vec<Offer>, OfferError> {
        let uuids: Vec<_> = ids.iter().map(|id| id.0).collect();

        let rows = sqlx::query(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers WHERE id = ANY($1)"
        ))
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_offer).collect()
    }

    async fn update(&self, offer: Offer) -> Result<Offer, OfferError> {
        // rating and comments_count belong to the aggregator and are only
        // read back here.
        let row = sqlx::query(&format!(
            r#"
            UPDATE offers
            SET title = $2, description = $3, city = $4, preview_image = $5, images = $6,
                is_premium = $7, housing_type = $8, rooms = $9, max_guests = $10,
                price = $11, comforts = $12, latitude = $13, longitude = $14
            WHERE id = $1
            RETURNING {OFFER_COLUMNS}
            "#
        ))
        .bind(offer.id.0)
        .bind(offer.title.as_str())
        .bind(offer.description.as_str())
        .bind(offer.city.as_str())
        .bind(offer.preview_image.as_str())
        .bind(offer.images.to_strings())
        .bind(offer.is_premium)
        .bind(offer.housing_type.as_str())
        .bind(i16::from(offer.rooms.value()))
        .bind(i16::from(offer.max_guests.value()))
        .bind(offer.price.value() as i32)
        .bind(offer.comforts.to_strings())
        .bind(offer.location.latitude())
        .bind(offer.location.longitude())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(row) => Self::row_to_offer(&row),
            None => Err(OfferError::NotFound(offer.id)),
        }
    }

    async fn update_stats(&self, id: &OfferId, stats: OfferStats) -> Result<(), OfferError> {
        let result = sqlx::query(
            r#"
            UPDATE offers
            SET rating = $2, comments_count = $3
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(stats.rating)
        .bind(i32::try_from(stats.comments_count).unwrap_or(i32::MAX))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(OfferError::NotFound(*id));
        }

        Ok(())
    }

    async fn delete(&self, id: &OfferId) -> Result<(), OfferError> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(OfferError::NotFound(*id));
        }

        Ok(())
    }
}
