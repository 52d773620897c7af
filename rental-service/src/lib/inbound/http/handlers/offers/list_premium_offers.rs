use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::offer::errors::OfferError;
use crate::domain::offer::models::City;
use crate::inbound::http::extractors::MaybeCurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::OfferListItemData;
use crate::inbound::http::router::AppState;

pub async fn list_premium_offers(
    State(state): State<AppState>,
    viewer: MaybeCurrentUser,
    Path(city): Path<String>,
) -> Result<ApiSuccess<Vec<OfferListItemData>>, ApiError> {
    let city = city.parse::<City>().map_err(OfferError::from)?;

    state
        .offer_service
        .list_premium_offers(city, viewer.user_id())
        .await
        .map_err(ApiError::from)
        .map(|offers| ApiSuccess::new(StatusCode::OK, offers.iter().map(Into::into).collect()))
}
