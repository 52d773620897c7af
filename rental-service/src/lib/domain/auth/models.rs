use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserName;
use crate::domain::user::models::UserType;

/// Command to register a new account with validated fields.
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: Password,
    pub user_type: UserType,
    /// Attached after the account exists; failure to attach does not undo
    /// the registration.
    pub avatar: Option<String>,
}

impl RegisterCommand {
    pub fn new(
        name: UserName,
        email: EmailAddress,
        password: Password,
        user_type: UserType,
        avatar: Option<String>,
    ) -> Self {
        Self {
            name,
            email,
            password,
            user_type,
            avatar,
        }
    }
}

/// Login attempt. The password is not policy-checked so that a wrong
/// password of any shape fails the same way.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

/// Authenticated session returned by login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}
