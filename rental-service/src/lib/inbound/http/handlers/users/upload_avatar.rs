use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AvatarFormat;
use crate::domain::user::models::AvatarUpload;
use crate::inbound::http::extractors::CurrentUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Multipart field carrying the image.
const AVATAR_FIELD: &str = "avatar";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarData {
    pub avatar: String,
}

pub async fn upload_avatar(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<ApiSuccess<AvatarData>, ApiError> {
    let upload = read_avatar(&mut multipart).await?;

    let updated = state
        .user_service
        .upload_avatar(&user.id, upload)
        .await
        .map_err(ApiError::from)?;

    tracing::info!(user_id = %updated.id, "Avatar uploaded");

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        AvatarData {
            avatar: updated.avatar_or_default().to_string(),
        },
    ))
}

async fn read_avatar(multipart: &mut Multipart) -> Result<AvatarUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let format = AvatarFormat::from_mime(&content_type).map_err(UserError::from)?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        return AvatarUpload::new(format, bytes.to_vec())
            .map_err(|e| UserError::from(e).into());
    }

    Err(ApiError::BadRequest(format!(
        "Missing multipart field '{}'",
        AVATAR_FIELD
    )))
}
