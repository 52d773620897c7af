use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller on endpoints that require one.
///
/// Rejects with 401 when no token, a malformed header or an invalid token
/// is presented.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Identity of the caller on endpoints usable anonymously.
///
/// An absent `Authorization` header yields `None`. A header that is present
/// but unusable still rejects with 401.
#[derive(Debug, Clone)]
pub struct MaybeCurrentUser(pub Option<User>);

impl MaybeCurrentUser {
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref().map(|user| &user.id)
    }
}

/// Raw token from `Authorization: Bearer <token>`, or `None` when the
/// header is absent.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let invalid = || ApiError::Unauthorized(AuthError::InvalidToken.to_string());

    let value = header.to_str().map_err(|_| invalid())?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(invalid)?;

    Ok(Some(token))
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeCurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let user = state.auth_service.resolve_identity(token).await.map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            ApiError::from(e)
        })?;

        Ok(Self(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let MaybeCurrentUser(user) = MaybeCurrentUser::from_request_parts(parts, state).await?;

        user.map(Self)
            .ok_or_else(|| ApiError::from(AuthError::MissingCredentials))
    }
}
