//! Mutation authorization for authored resources.
//!
//! Listings and comments record their author at creation and never change
//! it. Only that author may mutate or delete them.

use thiserror::Error;

use crate::domain::user::models::UserId;

/// Why a mutation was refused.
///
/// The two kinds map to different response codes and must stay distinct.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Only the author may modify this resource")]
    Forbidden,
}

/// A resource with an immutable author.
pub trait Authored {
    fn author_id(&self) -> &UserId;
}

/// Decide whether `acting_user` may mutate `resource`.
///
/// # Errors
/// * `Unauthenticated` - No identity was resolved for the request
/// * `Forbidden` - Identity resolved but is not the author
pub fn authorize_mutation<R>(resource: &R, acting_user: Option<&UserId>) -> Result<(), AccessError>
where
    R: Authored + ?Sized,
{
    match acting_user {
        None => Err(AccessError::Unauthenticated),
        Some(user_id) if user_id == resource.author_id() => Ok(()),
        Some(_) => Err(AccessError::Forbidden),
    }
}

/// Ownership check chained onto a lookup result.
pub trait AuthorCheck<T> {
    /// Verify authorship and hand the resource back if allowed.
    fn authorized_for(self, acting_user: Option<&UserId>) -> Result<T, AccessError>;
}

impl<T: Authored> AuthorCheck<T> for T {
    fn authorized_for(self, acting_user: Option<&UserId>) -> Result<T, AccessError> {
        authorize_mutation(&self, acting_user)?;
        Ok(self)
    }
}
