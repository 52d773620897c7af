use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::CommentText;
use crate::domain::comment::models::CreateCommentCommand;
use crate::domain::comment::models::Rating;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::offers::parse_offer_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CommentData;
use crate::inbound::http::handlers::ValidatedJson;
use crate::inbound::http::router::AppState;

/// HTTP request body for posting a comment (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    text: String,
    rating: i64,
}

impl CreateCommentRequest {
    fn try_into_command(self) -> Result<CreateCommentCommand, CommentError> {
        Ok(CreateCommentCommand {
            text: CommentText::new(self.text)?,
            rating: Rating::new(self.rating)?,
        })
    }
}

pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(author): CurrentUser,
    Path(offer_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CreateCommentRequest>,
) -> Result<ApiSuccess<CommentData>, ApiError> {
    let offer_id = parse_offer_id(&offer_id)?;
    let command = body.try_into_command()?;

    state
        .comment_service
        .create_comment(&offer_id, command, &author)
        .await
        .map_err(ApiError::from)
        .map(|ref comment| ApiSuccess::new(StatusCode::CREATED, comment.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let request = CreateCommentRequest {
            text: "Nice place".to_string(),
            rating: 6,
        };
        assert!(matches!(
            request.try_into_command(),
            Err(CommentError::InvalidRating(_))
        ));
    }

    #[test]
    fn test_fractional_rating_fails_to_deserialize() {
        let result = serde_json::from_value::<CreateCommentRequest>(serde_json::json!({
            "text": "Nice place",
            "rating": 4.5
        }));
        assert!(result.is_err());
    }
}
