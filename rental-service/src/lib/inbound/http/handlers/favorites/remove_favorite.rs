use axum::extract::Path;
use axum::extract::State;

use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::offers::parse_offer_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn remove_favorite(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(offer_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let offer_id = parse_offer_id(&offer_id)?;

    state
        .favorite_service
        .remove_favorite(&user.id, &offer_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::no_content())
}
