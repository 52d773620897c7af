//! Authentication utilities library
//!
//! Provides the credential primitives used by the rental service:
//! - Password hashing (Argon2id keyed with a process-wide pepper)
//! - Session token issuance and verification (HS256 JWT)
//! - Authentication coordination
//!
//! Secrets are passed in explicitly as [`Secret`] values, which refuse to be
//! empty. Nothing in this crate reads configuration on its own.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{PasswordHasher, Secret};
//!
//! let pepper = Secret::new("security.salt", "pepper").unwrap();
//! let hasher = PasswordHasher::new(pepper).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{JwtHandler, Secret, TokenVerification};
//!
//! let secret = Secret::new("jwt.secret", "secret_key_at_least_32_bytes_long!").unwrap();
//! let handler = JwtHandler::new(&secret);
//! let token = handler.issue("user123", "alice@example.com").unwrap();
//! assert!(matches!(handler.verify(&token), TokenVerification::Valid(_)));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Secret, TokenVerification};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     Secret::new("security.salt", "pepper").unwrap(),
//!     &Secret::new("jwt.secret", "secret_key_at_least_32_bytes_long!").unwrap(),
//!     Duration::days(7),
//! )
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth
//!     .authenticate("password123", &hash, "user123", "alice@example.com")
//!     .unwrap();
//!
//! // Resolve: check the token
//! match auth.verify_token(&result.access_token) {
//!     TokenVerification::Valid(claims) => assert_eq!(claims.user_id(), "user123"),
//!     TokenVerification::Invalid(reason) => panic!("rejected: {}", reason),
//! }
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod secret;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::InvalidToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use jwt::TokenVerification;
pub use jwt::DEFAULT_TOKEN_TTL_HOURS;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::Secret;
pub use secret::SecretError;
