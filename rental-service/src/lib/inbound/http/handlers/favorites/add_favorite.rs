use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::offers::parse_offer_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Empty JSON object body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteAddedData {}

pub async fn add_favorite(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(offer_id): Path<String>,
) -> Result<ApiSuccess<FavoriteAddedData>, ApiError> {
    let offer_id = parse_offer_id(&offer_id)?;

    state
        .favorite_service
        .add_favorite(&user.id, &offer_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::CREATED, FavoriteAddedData {}))
}
