use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::UserName;
use crate::domain::user::models::UserType;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::handlers::ValidatedJson;
use crate::inbound::http::router::AppState;

/// HTTP request body for a partial profile update (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub user_type: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, UserError> {
        Ok(UpdateProfileCommand {
            name: self.name.map(UserName::new).transpose()?,
            user_type: self
                .user_type
                .map(|t| t.parse::<UserType>())
                .transpose()?,
            avatar: self.avatar,
            password: self.password.map(Password::new).transpose()?,
        })
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .update_profile(&user.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
