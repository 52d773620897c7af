use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Session;
use crate::domain::user::models::User;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create an account.
    ///
    /// # Errors
    /// * `User(EmailAlreadyExists)` - Email is taken, compared case-insensitively
    /// * `Unknown` - Hashing failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError>;

    /// Check credentials and issue a session token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, indistinguishably
    async fn login(&self, command: LoginCommand) -> Result<Session, AuthError>;

    /// Map a presented bearer token to a user.
    ///
    /// # Returns
    /// `None` when no token was presented
    ///
    /// # Errors
    /// * `InvalidToken` - A token was presented but cannot be trusted
    async fn resolve_identity(&self, token: Option<&str>) -> Result<Option<User>, AuthError>;
}
