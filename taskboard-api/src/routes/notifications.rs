/// Notification endpoints
///
/// # Endpoints
///
/// - `GET /v1/notifications` - Newest first, with unread count
/// - `POST /v1/notifications/:id/read` - Mark one read (unknown ids ignored)
/// - `POST /v1/notifications/read_all` - Mark all read

use crate::{app::AppState, error::ApiResult, response::ApiResponse};
use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Serialize;
use taskboard_shared::{auth::middleware::AuthContext, store::NotificationSummary};

/// Result of a mark-read call
#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    /// Notifications whose flag changed
    pub marked: usize,

    pub unread_count: usize,
}

pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<ApiResponse<NotificationSummary>> {
    let summary = state.store.notifications(&auth.username).await?;
    Ok(ApiResponse::data(summary))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<u64>,
) -> ApiResult<ApiResponse<MarkReadResponse>> {
    let marked = state
        .store
        .mark_notification_read(&auth.username, id)
        .await?;
    let unread_count = state.store.notifications(&auth.username).await?.unread_count;

    Ok(ApiResponse::data(MarkReadResponse {
        marked: usize::from(marked),
        unread_count,
    }))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<ApiResponse<MarkReadResponse>> {
    let marked = state
        .store
        .mark_all_notifications_read(&auth.username)
        .await?;

    Ok(ApiResponse::data(MarkReadResponse {
        marked,
        unread_count: 0,
    }))
}
