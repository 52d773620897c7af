pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

// Re-export commonly used types
pub use domain::auth::service::AuthService;
pub use domain::comment::service::CommentService;
pub use domain::favorite::service::FavoriteService;
pub use domain::offer::service::OfferService;
pub use domain::rating::aggregator::compute_offer_stats;
pub use domain::user::models::UserId;
pub use domain::user::service::UserService;
