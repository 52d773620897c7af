use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::offers::parse_offer_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CommentData;
use crate::inbound::http::router::AppState;

pub async fn list_comments(
    State(state): State<AppState>,
    Path(offer_id): Path<String>,
) -> Result<ApiSuccess<Vec<CommentData>>, ApiError> {
    let offer_id = parse_offer_id(&offer_id)?;

    state
        .comment_service
        .list_comments(&offer_id)
        .await
        .map_err(ApiError::from)
        .map(|comments| {
            ApiSuccess::new(StatusCode::OK, comments.iter().map(Into::into).collect())
        })
}
