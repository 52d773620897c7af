pub mod add_favorite;
pub mod list_favorites;
pub mod remove_favorite;

pub use add_favorite::add_favorite;
pub use list_favorites::list_favorites;
pub use remove_favorite::remove_favorite;
