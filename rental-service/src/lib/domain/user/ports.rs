use async_trait::async_trait;

use crate::domain::user::errors::AvatarError;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::AvatarUpload;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Update the caller's own profile.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Optional name, type, avatar and password
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError>;

    /// Store an avatar image and point the user at it.
    ///
    /// # Errors
    /// * `Avatar` - Image could not be stored
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn upload_avatar(&self, id: &UserId, upload: AvatarUpload) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by normalised email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve multiple users by identifiers.
    ///
    /// # Returns
    /// Vector of found users (missing IDs are skipped without error)
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;
}

/// File storage for avatar images.
#[async_trait]
pub trait AvatarStorage: Send + Sync + 'static {
    /// Persist an image.
    ///
    /// # Returns
    /// Public path under which the image is served
    ///
    /// # Errors
    /// * `StorageFailed` - Image could not be written
    async fn store(&self, upload: AvatarUpload) -> Result<String, AvatarError>;
}
