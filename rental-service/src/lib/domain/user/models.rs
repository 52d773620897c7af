use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::errors::AvatarError;
use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::errors::UserNameError;
use crate::domain::user::errors::UserTypeError;

/// Avatar reported for users who never set one.
pub const DEFAULT_AVATAR: &str = "/img/avatar.svg";

/// User aggregate entity.
///
/// Represents a registered user. The password hash never leaves the domain
/// and outbound layers.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub avatar: Option<String>,
    pub user_type: UserType,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn avatar_or_default(&self) -> &str {
        self.avatar.as_deref().unwrap_or(DEFAULT_AVATAR)
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Between 1 and 15 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MAX_LENGTH: usize = 15;

    pub fn new(name: String) -> Result<Self, UserNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(UserNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UserNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser and normalised to trimmed lowercase, so
/// two spellings of the same address always compare (and collide) equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at registration or profile update.
///
/// Only lives long enough to be hashed. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;
    const MAX_LENGTH: usize = 12;

    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserType {
    #[default]
    Normal,
    Pro,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Normal => "normal",
            UserType::Pro => "pro",
        }
    }
}

impl FromStr for UserType {
    type Err = UserTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(UserType::Normal),
            "pro" => Ok(UserType::Pro),
            other => Err(UserTypeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted avatar image encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarFormat {
    Jpeg,
    Png,
}

impl AvatarFormat {
    /// Resolve a format from a MIME type.
    ///
    /// # Errors
    /// * `UnsupportedFormat` - Anything but `image/jpeg` or `image/png`
    pub fn from_mime(mime: &str) -> Result<Self, AvatarError> {
        match mime {
            "image/jpeg" | "image/jpg" => Ok(AvatarFormat::Jpeg),
            "image/png" => Ok(AvatarFormat::Png),
            other => Err(AvatarError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AvatarFormat::Jpeg => "jpg",
            AvatarFormat::Png => "png",
        }
    }
}

/// Avatar image received from a client, not yet stored.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub format: AvatarFormat,
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    pub fn new(format: AvatarFormat, bytes: Vec<u8>) -> Result<Self, AvatarError> {
        if bytes.is_empty() {
            return Err(AvatarError::Empty);
        }
        Ok(Self { format, bytes })
    }
}

/// Command to update a user profile with optional validated fields.
///
/// Email is immutable and therefore absent.
#[derive(Debug, Default)]
pub struct UpdateProfileCommand {
    pub name: Option<UserName>,
    pub user_type: Option<UserType>,
    pub avatar: Option<String>,
    pub password: Option<Password>,
}
