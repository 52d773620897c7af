use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::create_offer::LocationRequest;
use super::parse_offer_id;
use crate::domain::offer::errors::OfferError;
use crate::domain::offer::errors::OfferValidationError;
use crate::domain::offer::models::Comforts;
use crate::domain::offer::models::ImageRef;
use crate::domain::offer::models::MaxGuests;
use crate::domain::offer::models::OfferDescription;
use crate::domain::offer::models::OfferImages;
use crate::domain::offer::models::OfferTitle;
use crate::domain::offer::models::Price;
use crate::domain::offer::models::Rooms;
use crate::domain::offer::models::UpdateOfferCommand;
use crate::inbound::http::extractors::MaybeCurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::OfferData;
use crate::inbound::http::handlers::ValidatedJson;
use crate::inbound::http::router::AppState;

/// HTTP request body for a partial offer update (raw JSON)
///
/// Derived fields and the author are not accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferRequest {
    title: Option<String>,
    description: Option<String>,
    city: Option<String>,
    preview_image: Option<String>,
    images: Option<Vec<String>>,
    is_premium: Option<bool>,
    housing_type: Option<String>,
    rooms: Option<i64>,
    max_guests: Option<i64>,
    price: Option<i64>,
    comforts: Option<Vec<String>>,
    location: Option<LocationRequest>,
}

impl UpdateOfferRequest {
    fn try_into_command(self) -> Result<UpdateOfferCommand, OfferValidationError> {
        Ok(UpdateOfferCommand {
            title: self.title.map(OfferTitle::new).transpose()?,
            description: self.description.map(OfferDescription::new).transpose()?,
            city: self.city.map(|c| c.parse()).transpose()?,
            preview_image: self.preview_image.map(ImageRef::new).transpose()?,
            images: self.images.map(OfferImages::new).transpose()?,
            is_premium: self.is_premium,
            housing_type: self.housing_type.map(|h| h.parse()).transpose()?,
            rooms: self.rooms.map(Rooms::new).transpose()?,
            max_guests: self.max_guests.map(MaxGuests::new).transpose()?,
            price: self.price.map(Price::new).transpose()?,
            comforts: self
                .comforts
                .map(|names| Comforts::parse(&names))
                .transpose()?,
            location: self
                .location
                .map(LocationRequest::try_into_location)
                .transpose()?,
        })
    }
}

pub async fn update_offer(
    State(state): State<AppState>,
    viewer: MaybeCurrentUser,
    Path(offer_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateOfferRequest>,
) -> Result<ApiSuccess<OfferData>, ApiError> {
    let offer_id = parse_offer_id(&offer_id)?;
    let command = body.try_into_command().map_err(OfferError::from)?;

    state
        .offer_service
        .update_offer(&offer_id, command, viewer.user_id())
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::OK, details.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_changes_nothing() {
        let command = UpdateOfferRequest::default().try_into_command().unwrap();
        assert!(command.title.is_none());
        assert!(command.price.is_none());
    }

    #[test]
    fn test_derived_fields_are_ignored() {
        let request: UpdateOfferRequest = serde_json::from_value(serde_json::json!({
            "rating": 5.0,
            "commentsCount": 100,
            "price": 300
        }))
        .unwrap();

        let command = request.try_into_command().unwrap();
        assert_eq!(command.price.map(|p| p.value()), Some(300));
    }

    #[test]
    fn test_invalid_field_is_rejected() {
        let request = UpdateOfferRequest {
            rooms: Some(9),
            ..UpdateOfferRequest::default()
        };
        assert!(request.try_into_command().is_err());
    }
}
