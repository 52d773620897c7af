use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenVerification;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::secret::Secret;

/// Plaintext behind the decoy hash. Never matched by a login on purpose;
/// only the verification cost matters.
const DECOY_PASSWORD: &str = "decoy-account-password";

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the two process-wide secrets. Built once at startup and shared
/// behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    /// Peppered hash verified against when no account matches, so that an
    /// unknown account costs the same Argon2 work as a wrong password.
    decoy_hash: String,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `pepper` - Secret mixed into every password hash
    /// * `signing_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `PasswordError` - Hasher could not be configured with the pepper
    pub fn new(
        pepper: Secret,
        signing_secret: &Secret,
        token_ttl: Duration,
    ) -> Result<Self, AuthenticationError> {
        let password_hasher = PasswordHasher::new(pepper)?;
        let decoy_hash = password_hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            password_hasher,
            jwt_handler: JwtHandler::new(signing_secret).with_ttl(token_ttl),
            decoy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identity to bind into the token
    /// * `email` - Email to bind into the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: impl ToString,
        email: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(user_id, email)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs a full verification against the decoy hash first, so the caller
    /// cannot tell an unknown account from a wrong password by latency.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Always, once the verification has run
    /// * `PasswordError` - Decoy verification failed
    pub fn reject_unknown_account(&self, password: &str) -> Result<(), AuthenticationError> {
        self.password_hasher.verify(password, &self.decoy_hash)?;
        Err(AuthenticationError::InvalidCredentials)
    }

    /// Check a presented token.
    pub fn verify_token(&self, token: &str) -> TokenVerification {
        self.jwt_handler.verify(token)
    }
}
