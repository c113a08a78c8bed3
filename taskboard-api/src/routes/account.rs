/// Account endpoints: settings and avatar
///
/// The avatar is a reference to an image held by an upload service; the API
/// stores only the reference and falls back to generated initials and color.
///
/// # Endpoints
///
/// - `GET /v1/settings`, `PUT /v1/settings`
/// - `GET /v1/avatar`, `PUT /v1/avatar`, `DELETE /v1/avatar`

use crate::{app::AppState, error::ApiResult, response::ApiResponse};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::{
        settings::{Theme, UpdateSettings, UserSettings},
        user::Avatar,
    },
};
use validator::Validate;

/// Settings update; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    pub theme: Option<Theme>,

    pub notifications_enabled: Option<bool>,

    #[validate(length(max = 16, message = "Language code must be at most 16 characters"))]
    pub language: Option<String>,
}

/// Avatar update
#[derive(Debug, Deserialize, Validate)]
pub struct SetAvatarRequest {
    #[validate(length(min = 1, max = 512, message = "Avatar reference must be 1-512 characters"))]
    pub reference: String,
}

pub async fn get_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<ApiResponse<UserSettings>> {
    let settings = state.store.settings(&auth.username).await?;
    Ok(ApiResponse::data(settings))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateSettingsRequest>,
) -> ApiResult<ApiResponse<UserSettings>> {
    req.validate()?;

    let patch = UpdateSettings {
        theme: req.theme,
        notifications_enabled: req.notifications_enabled,
        language: req.language,
    };
    let settings = state.store.update_settings(&auth.username, patch).await?;
    Ok(ApiResponse::with_message("Settings saved", settings))
}

pub async fn get_avatar(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<ApiResponse<Avatar>> {
    let avatar = state.store.avatar(&auth.username).await?;
    Ok(ApiResponse::data(avatar))
}

pub async fn set_avatar(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<SetAvatarRequest>,
) -> ApiResult<ApiResponse<Avatar>> {
    req.validate()?;

    let avatar = state
        .store
        .set_avatar(&auth.username, Some(req.reference))
        .await?;
    Ok(ApiResponse::with_message("Avatar updated", avatar))
}

pub async fn remove_avatar(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<ApiResponse<Avatar>> {
    let avatar = state.store.set_avatar(&auth.username, None).await?;
    Ok(ApiResponse::with_message("Avatar removed", avatar))
}
