use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::access::AccessError;
use crate::domain::auth::errors::AuthError;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::CommentWithAuthor;
use crate::domain::favorite::errors::FavoriteError;
use crate::domain::offer::errors::OfferError;
use crate::domain::offer::models::Location;
use crate::domain::offer::models::OfferDetails;
use crate::domain::offer::models::OfferWithFavorite;
use crate::domain::user::errors::AvatarError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;

pub mod auth;
pub mod comments;
pub mod favorites;
pub mod offers;
pub mod users;

/// Message returned for every 500. The detail only goes to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl ApiSuccess<()> {
    pub fn no_content() -> Self {
        ApiSuccess(StatusCode::NO_CONTENT, Json(()))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        if self.0 == StatusCode::NO_CONTENT {
            return self.0.into_response();
        }
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(format!("{:#}", e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// JSON body extractor whose rejections use the `{message}` error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidatedJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => ApiError::Unauthorized(err.to_string()),
            AccessError::Forbidden => ApiError::Forbidden(err.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUserId(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidUserType(_)
            | UserError::Avatar(AvatarError::UnsupportedFormat(_))
            | UserError::Avatar(AvatarError::Empty) => ApiError::BadRequest(err.to_string()),
            UserError::Avatar(AvatarError::StorageFailed(_))
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::MissingCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::User(user_error) => user_error.into(),
            AuthError::Unknown(msg) => ApiError::InternalServerError(msg),
        }
    }
}

impl From<OfferError> for ApiError {
    fn from(err: OfferError) -> Self {
        match err {
            OfferError::InvalidOfferId(_) | OfferError::Invalid(_) => {
                ApiError::BadRequest(err.to_string())
            }
            OfferError::NotFound(_) => ApiError::NotFound(err.to_string()),
            OfferError::Access(access) => access.into(),
            OfferError::AuthorNotFound(_)
            | OfferError::DatabaseError(_)
            | OfferError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<CommentError> for ApiError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::InvalidCommentId(_)
            | CommentError::InvalidText(_)
            | CommentError::InvalidRating(_) => ApiError::BadRequest(err.to_string()),
            CommentError::NotFound(_) | CommentError::OfferNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            CommentError::Access(access) => access.into(),
            CommentError::DatabaseError(msg) | CommentError::Unknown(msg) => {
                ApiError::InternalServerError(msg)
            }
        }
    }
}

impl From<FavoriteError> for ApiError {
    fn from(err: FavoriteError) -> Self {
        match err {
            FavoriteError::OfferNotFound(_) => ApiError::NotFound(err.to_string()),
            FavoriteError::AlreadyExists
            | FavoriteError::DatabaseError(_)
            | FavoriteError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    #[serde(rename = "type")]
    pub user_type: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            avatar: user.avatar_or_default().to_string(),
            user_type: user.user_type.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationData {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Location> for LocationData {
    fn from(location: &Location) -> Self {
        Self {
            latitude: location.latitude(),
            longitude: location.longitude(),
        }
    }
}

/// Offer as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferListItemData {
    pub id: String,
    pub title: String,
    pub post_date: DateTime<Utc>,
    pub city: String,
    pub preview_image: String,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    pub housing_type: String,
    pub price: u32,
    pub comments_count: u32,
}

impl From<&OfferWithFavorite> for OfferListItemData {
    fn from(item: &OfferWithFavorite) -> Self {
        let offer = &item.offer;
        Self {
            id: offer.id.to_string(),
            title: offer.title.as_str().to_string(),
            post_date: offer.post_date,
            city: offer.city.as_str().to_string(),
            preview_image: offer.preview_image.as_str().to_string(),
            is_premium: offer.is_premium,
            is_favorite: item.is_favorite,
            rating: offer.rating,
            housing_type: offer.housing_type.as_str().to_string(),
            price: offer.price.value(),
            comments_count: offer.comments_count,
        }
    }
}

/// Full offer with its author.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferData {
    #[serde(flatten)]
    pub summary: OfferListItemData,
    pub description: String,
    pub images: Vec<String>,
    pub rooms: u8,
    pub max_guests: u8,
    pub comforts: Vec<String>,
    pub author: UserData,
    pub location: LocationData,
}

impl From<&OfferDetails> for OfferData {
    fn from(details: &OfferDetails) -> Self {
        let offer = &details.offer;
        let summary = OfferWithFavorite {
            offer: offer.clone(),
            is_favorite: details.is_favorite,
        };

        Self {
            summary: (&summary).into(),
            description: offer.description.as_str().to_string(),
            images: offer.images.to_strings(),
            rooms: offer.rooms.value(),
            max_guests: offer.max_guests.value(),
            comforts: offer.comforts.to_strings(),
            author: (&details.author).into(),
            location: (&offer.location).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentData {
    pub id: String,
    pub text: String,
    pub rating: u8,
    pub post_date: DateTime<Utc>,
    pub author: UserData,
}

impl From<&CommentWithAuthor> for CommentData {
    fn from(item: &CommentWithAuthor) -> Self {
        Self {
            id: item.comment.id.to_string(),
            text: item.comment.text.as_str().to_string(),
            rating: item.comment.rating.value(),
            post_date: item.comment.post_date,
            author: (&item.author).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::domain::offer::models::OfferId;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let response =
            ApiError::InternalServerError("relation \"offers\" does not exist".to_string())
                .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "Internal server error" })
        );
    }

    #[tokio::test]
    async fn test_error_body_carries_message() {
        let response = ApiError::from(OfferError::NotFound(OfferId::new())).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Offer not found"));
    }

    #[test]
    fn test_access_errors_map_to_distinct_codes() {
        assert!(matches!(
            ApiError::from(OfferError::Access(AccessError::Unauthenticated)),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(CommentError::Access(AccessError::Forbidden)),
            ApiError::Forbidden(_)
        ));
    }

    #[test]
    fn test_duplicate_email_is_conflict() {
        let err = AuthError::User(UserError::EmailAlreadyExists("a@x.com".to_string()));
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[test]
    fn test_no_content_has_empty_body() {
        let response = ApiSuccess::no_content().into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
