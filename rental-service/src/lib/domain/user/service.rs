use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::auth::credentials;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::AvatarUpload;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AvatarStorage;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user profile operations.
pub struct UserService<UR, AS>
where
    UR: UserRepository,
    AS: AvatarStorage,
{
    repository: Arc<UR>,
    avatar_storage: Arc<AS>,
    authenticator: Arc<Authenticator>,
}

impl<UR, AS> UserService<UR, AS>
where
    UR: UserRepository,
    AS: AvatarStorage,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `avatar_storage` - Avatar file storage
    /// * `authenticator` - Credential store used to rehash changed passwords
    pub fn new(
        repository: Arc<UR>,
        avatar_storage: Arc<AS>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            avatar_storage,
            authenticator,
        }
    }

    async fn load(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR, AS> UserServicePort for UserService<UR, AS>
where
    UR: UserRepository,
    AS: AvatarStorage,
{
    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self.load(id).await?;

        if let Some(name) = command.name {
            user.name = name;
        }

        if let Some(user_type) = command.user_type {
            user.user_type = user_type;
        }

        if let Some(avatar) = command.avatar {
            user.avatar = Some(avatar);
        }

        if let Some(password) = command.password {
            user.password_hash =
                credentials::hash_password(&self.authenticator, &password).await?;
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User profile updated");

        Ok(updated_user)
    }

    async fn upload_avatar(&self, id: &UserId, upload: AvatarUpload) -> Result<User, UserError> {
        let mut user = self.load(id).await?;

        let path = self.avatar_storage.store(upload).await?;
        user.avatar = Some(path);

        let updated_user = self.repository.update(user).await?;
        tracing::info!(
            user_id = %updated_user.id,
            avatar = updated_user.avatar_or_default(),
            "User avatar updated"
        );

        Ok(updated_user)
    }
}
