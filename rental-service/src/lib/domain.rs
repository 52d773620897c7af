pub mod access;
pub mod auth;
pub mod comment;
pub mod favorite;
pub mod offer;
pub mod rating;
pub mod user;
