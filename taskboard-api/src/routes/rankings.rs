/// Leaderboard and statistics endpoints
///
/// # Endpoints
///
/// - `GET /v1/rankings` - Top 10 by monthly score plus the caller's own record
/// - `GET /v1/stats/:period` - Per-day created/completed counts (`week` or `month`)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::{
    extract::{Path, State},
    Extension,
};
use taskboard_shared::{
    auth::middleware::AuthContext,
    stats::{ActivityReport, Period},
    store::Rankings,
};

pub async fn rankings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<ApiResponse<Rankings>> {
    let rankings = state.store.rankings(&auth.username).await?;
    Ok(ApiResponse::data(rankings))
}

/// Activity series for the caller
///
/// # Errors
///
/// - `404 Not Found`: Period other than `week` or `month`
pub async fn activity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(period): Path<String>,
) -> ApiResult<ApiResponse<ActivityReport>> {
    let period: Period = period.parse().map_err(ApiError::NotFound)?;
    let report = state.store.activity(&auth.username, period).await?;
    Ok(ApiResponse::data(report))
}
