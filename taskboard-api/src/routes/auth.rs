/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/login` - Login and get a session token
/// - `POST /v1/auth/logout` - Revoke the current session
/// - `POST /v1/auth/change_password` - Change the current user's password

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{
        jwt::{self, default_session_ttl},
        middleware::AuthContext,
    },
    models::user::User,
};
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token (24h)
    pub token: String,

    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,

    pub user: User,
}

/// Change password request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,

    pub confirm_password: String,
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// { "username": "maria", "password": "1234" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": { "token": "eyJ...", "expires_at": "...", "user": { ... } }
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid username or password
/// - `422 Unprocessable Entity`: Missing fields
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<ApiResponse<LoginResponse>> {
    req.validate()?;

    let user = state
        .store
        .authenticate(req.username.trim(), &req.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let claims = jwt::Claims::new(&user.username, default_session_ttl());
    let token = jwt::create_token(&claims, state.jwt_secret())?;
    let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
        .ok_or_else(|| ApiError::InternalError("Token expiry out of range".to_string()))?;

    tracing::info!(username = %user.username, session_id = %claims.sid, "User logged in");

    Ok(ApiResponse::data(LoginResponse {
        token,
        expires_at,
        user,
    }))
}

/// Logout endpoint
///
/// Revokes the session id carried by the token; the token is rejected from
/// then on even though it has not expired.
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResponse<()> {
    state.sessions.revoke(auth.session_id, auth.expires_at).await;
    tracing::info!(username = %auth.username, session_id = %auth.session_id, "User logged out");

    ApiResponse::message("Logged out")
}

/// Change password endpoint
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Confirmation mismatch, wrong current
///   password, or new password shorter than 4 characters
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<ApiResponse<()>> {
    req.validate()?;

    if req.new_password != req.confirm_password {
        return Err(ApiError::validation(
            "confirm_password",
            "Passwords do not match",
        ));
    }

    state
        .store
        .change_password(&auth.username, &req.current_password, &req.new_password)
        .await?;

    Ok(ApiResponse::message("Password changed"))
}
