use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::OfferListItemData;
use crate::inbound::http::router::AppState;

pub async fn list_favorites(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<ApiSuccess<Vec<OfferListItemData>>, ApiError> {
    state
        .favorite_service
        .list_favorites(&user.id)
        .await
        .map_err(ApiError::from)
        .map(|offers| ApiSuccess::new(StatusCode::OK, offers.iter().map(Into::into).collect()))
}
