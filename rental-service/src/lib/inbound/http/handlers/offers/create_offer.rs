use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::offer::errors::OfferError;
use crate::domain::offer::errors::OfferValidationError;
use crate::domain::offer::models::Comforts;
use crate::domain::offer::models::CreateOfferCommand;
use crate::domain::offer::models::ImageRef;
use crate::domain::offer::models::Location;
use crate::domain::offer::models::MaxGuests;
use crate::domain::offer::models::OfferDescription;
use crate::domain::offer::models::OfferImages;
use crate::domain::offer::models::OfferTitle;
use crate::domain::offer::models::Price;
use crate::domain::offer::models::Rooms;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::OfferData;
use crate::inbound::http::handlers::ValidatedJson;
use crate::inbound::http::router::AppState;

pub async fn create_offer(
    State(state): State<AppState>,
    CurrentUser(author): CurrentUser,
    ValidatedJson(body): ValidatedJson<CreateOfferRequest>,
) -> Result<ApiSuccess<OfferData>, ApiError> {
    let command = body.try_into_command().map_err(OfferError::from)?;

    state
        .offer_service
        .create_offer(command, &author)
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::CREATED, details.into()))
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationRequest {
    pub(crate) fn try_into_location(self) -> Result<Location, OfferValidationError> {
        Location::new(self.latitude, self.longitude)
    }
}

/// HTTP request body for publishing an offer (raw JSON)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    title: String,
    description: String,
    city: String,
    preview_image: String,
    images: Vec<String>,
    #[serde(default)]
    is_premium: bool,
    housing_type: String,
    rooms: i64,
    max_guests: i64,
    price: i64,
    #[serde(default)]
    comforts: Vec<String>,
    location: LocationRequest,
}

impl CreateOfferRequest {
    fn try_into_command(self) -> Result<CreateOfferCommand, OfferValidationError> {
        Ok(CreateOfferCommand {
            title: OfferTitle::new(self.title)?,
            description: OfferDescription::new(self.description)?,
            city: self.city.parse()?,
            preview_image: ImageRef::new(self.preview_image)?,
            images: OfferImages::new(self.images)?,
            is_premium: self.is_premium,
            housing_type: self.housing_type.parse()?,
            rooms: Rooms::new(self.rooms)?,
            max_guests: MaxGuests::new(self.max_guests)?,
            price: Price::new(self.price)?,
            comforts: Comforts::parse(&self.comforts)?,
            location: self.location.try_into_location()?,
        })
    }
}
