/// Dashboard endpoint
///
/// # Endpoint
///
/// ```text
/// GET /v1/dashboard
/// ```
///
/// Returns the caller's projects, the active project's columns, live stats,
/// points, level, achievements, role display name and permissions.

use crate::{app::AppState, error::ApiResult, response::ApiResponse};
use axum::{extract::State, Extension};
use taskboard_shared::{auth::middleware::AuthContext, store::Dashboard};

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<ApiResponse<Dashboard>> {
    let dashboard = state.store.dashboard(&auth.username).await?;
    Ok(ApiResponse::data(dashboard))
}
