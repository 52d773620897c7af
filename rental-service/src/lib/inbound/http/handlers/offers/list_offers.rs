use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::offer::models::DEFAULT_OFFER_LIMIT;
use crate::inbound::http::extractors::MaybeCurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::OfferListItemData;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct ListOffersQuery {
    pub limit: Option<usize>,
}

pub async fn list_offers(
    State(state): State<AppState>,
    viewer: MaybeCurrentUser,
    query: Result<Query<ListOffersQuery>, QueryRejection>,
) -> Result<ApiSuccess<Vec<OfferListItemData>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let limit = query.limit.unwrap_or(DEFAULT_OFFER_LIMIT);

    state
        .offer_service
        .list_offers(viewer.user_id(), limit)
        .await
        .map_err(ApiError::from)
        .map(|offers| ApiSuccess::new(StatusCode::OK, offers.iter().map(Into::into).collect()))
}
