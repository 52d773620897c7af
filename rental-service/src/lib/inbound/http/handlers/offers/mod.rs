pub mod create_offer;
pub mod delete_offer;
pub mod get_offer;
pub mod list_offers;
pub mod list_premium_offers;
pub mod update_offer;

pub use create_offer::create_offer;
pub use delete_offer::delete_offer;
pub use get_offer::get_offer;
pub use list_offers::list_offers;
pub use list_premium_offers::list_premium_offers;
pub use update_offer::update_offer;

use crate::domain::offer::errors::OfferError;
use crate::domain::offer::models::OfferId;

/// Parse the `:offerId` path segment.
pub(crate) fn parse_offer_id(raw: &str) -> Result<OfferId, OfferError> {
    Ok(OfferId::from_string(raw)?)
}
