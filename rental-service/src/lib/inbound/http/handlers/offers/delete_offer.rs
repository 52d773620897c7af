use axum::extract::Path;
use axum::extract::State;

use super::parse_offer_id;
use crate::inbound::http::extractors::MaybeCurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_offer(
    State(state): State<AppState>,
    viewer: MaybeCurrentUser,
    Path(offer_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let offer_id = parse_offer_id(&offer_id)?;

    state
        .offer_service
        .delete_offer(&offer_id, viewer.user_id())
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::no_content())
}
