pub mod comment;
pub mod favorite;
pub mod memory;
pub mod offer;
pub mod user;

pub use comment::PostgresCommentRepository;
pub use favorite::PostgresFavoriteRepository;
pub use memory::InMemoryStore;
pub use offer::PostgresOfferRepository;
pub use user::PostgresUserRepository;
