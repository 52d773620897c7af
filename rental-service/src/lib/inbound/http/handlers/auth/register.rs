use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::auth::models::RegisterCommand;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UserName;
use crate::domain::user::models::UserType;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::handlers::ValidatedJson;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    #[serde(rename = "type", default)]
    user_type: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, UserError> {
        let name = UserName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let user_type = self
            .user_type
            .map(|t| t.parse::<UserType>())
            .transpose()?
            .unwrap_or_default();
        let avatar = self
            .avatar
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        Ok(RegisterCommand::new(name, email, password, user_type, avatar))
    }
}
