pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::SessionClaims;
pub use errors::InvalidToken;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use handler::TokenVerification;
pub use handler::DEFAULT_TOKEN_TTL_HOURS;
