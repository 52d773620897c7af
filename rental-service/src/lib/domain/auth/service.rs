use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenVerification;
use chrono::Utc;

use crate::domain::auth::credentials;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::Session;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Registration, login and request identity resolution.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            users,
            authenticator,
        }
    }

    /// Best-effort avatar attachment after the account exists.
    async fn attach_avatar(&self, created: User, avatar: String) -> User {
        let mut with_avatar = created.clone();
        with_avatar.avatar = Some(avatar);

        match self.users.update(with_avatar).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(
                    user_id = %created.id,
                    error = %e,
                    "Failed to attach avatar after registration, keeping account"
                );
                created
            }
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AuthError> {
        if self.users.find_by_email(&command.email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()).into());
        }

        let password_hash =
            credentials::hash_password(&self.authenticator, &command.password).await?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            avatar: None,
            user_type: command.user_type,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.users.create(user).await?;
        tracing::info!(user_id = %created.id, email = %created.email, "User registered");

        match command.avatar {
            Some(avatar) => Ok(self.attach_avatar(created, avatar).await),
            None => Ok(created),
        }
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        let Some(user) = self.users.find_by_email(&command.email).await? else {
            let outcome =
                credentials::blocking(move || authenticator.reject_unknown_account(&password))
                    .await?;
            tracing::debug!(email = %command.email, "Login for unknown email");

            return match outcome {
                Err(AuthenticationError::PasswordError(e)) => Err(AuthError::Unknown(e.to_string())),
                _ => Err(AuthError::InvalidCredentials),
            };
        };

        let stored_hash = user.password_hash.clone();
        let user_id = user.id;
        let email = user.email.to_string();

        let outcome = credentials::blocking(move || {
            authenticator.authenticate(&password, &stored_hash, user_id, &email)
        })
        .await?;

        match outcome {
            Ok(result) => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(Session {
                    user,
                    token: result.access_token,
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(user_id = %user.id, "Login with wrong password");
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => Err(AuthError::Unknown(e.to_string())),
        }
    }

    async fn resolve_identity(&self, token: Option<&str>) -> Result<Option<User>, AuthError> {
        let Some(token) = token else {
            return Ok(None);
        };

        let claims = match self.authenticator.verify_token(token) {
            TokenVerification::Valid(claims) => claims,
            TokenVerification::Invalid(reason) => {
                tracing::debug!(reason = %reason, "Rejected session token");
                return Err(AuthError::InvalidToken);
            }
        };

        let user_id =
            UserId::from_string(claims.user_id()).map_err(|_| AuthError::InvalidToken)?;

        match self.users.find_by_id(&user_id).await? {
            Some(user) => Ok(Some(user)),
            None => {
                tracing::debug!(user_id = %user_id, "Token names a user that does not exist");
                Err(AuthError::InvalidToken)
            }
        }
    }
}
