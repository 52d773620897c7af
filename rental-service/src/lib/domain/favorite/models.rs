use chrono::DateTime;
use chrono::Utc;

use crate::domain::offer::models::OfferId;
use crate::domain::user::models::UserId;

/// Records that a user favorited an offer. At most one per pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteMarker {
    pub user_id: UserId,
    pub offer_id: OfferId,
    pub created_at: DateTime<Utc>,
}

impl FavoriteMarker {
    pub fn new(user_id: UserId, offer_id: OfferId) -> Self {
        Self {
            user_id,
            offer_id,
            created_at: Utc::now(),
        }
    }
}
