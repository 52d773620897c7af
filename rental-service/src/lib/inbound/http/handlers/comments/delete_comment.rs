use axum::extract::Path;
use axum::extract::State;

use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::CommentId;
use crate::inbound::http::extractors::MaybeCurrentUser;
use crate::inbound::http::handlers::offers::parse_offer_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_comment(
    State(state): State<AppState>,
    viewer: MaybeCurrentUser,
    Path((offer_id, comment_id)): Path<(String, String)>,
) -> Result<ApiSuccess<()>, ApiError> {
    let offer_id = parse_offer_id(&offer_id)?;
    let comment_id = CommentId::from_string(&comment_id).map_err(CommentError::from)?;

    state
        .comment_service
        .delete_comment(&offer_id, &comment_id, viewer.user_id())
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::no_content())
}
