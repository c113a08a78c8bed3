/// Task endpoints
///
/// All task operations act on the caller's active project, except comments
/// and reactions, which reach a task on any of the caller's projects.
///
/// # Endpoints
///
/// - `POST /v1/tasks` - Add a task to `todo` (+10 points)
/// - `POST /v1/tasks/move` - Move a task between columns (+20 points into `done`)
/// - `GET /v1/tasks/:task_id` - Task details with comments
/// - `GET /v1/tasks/:task_id/comments` - List comments and reactions
/// - `POST /v1/tasks/:task_id/comments` - Add a comment (+5 points)
/// - `POST /v1/tasks/:task_id/reactions` - Add an emoji reaction

use crate::{app::AppState, error::ApiResult, response::ApiResponse};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::middleware::AuthContext,
    board::TaskDetails,
    models::{comment::Comment, task::{Column, Task}},
};
use validator::Validate;

/// Add task request
#[derive(Debug, Deserialize, Validate)]
pub struct AddTaskRequest {
    #[validate(length(max = 500, message = "Task text must be at most 500 characters"))]
    pub text: String,
}

/// Move task request
///
/// Columns accept `todo`, `inprogress` (or `in-progress`) and `done`.
#[derive(Debug, Deserialize)]
pub struct MoveTaskRequest {
    pub task_id: String,
    pub from: Column,
    pub to: Column,
}

/// Add comment request
#[derive(Debug, Deserialize, Validate)]
pub struct AddCommentRequest {
    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub text: String,
}

/// Add reaction request
#[derive(Debug, Deserialize)]
pub struct AddReactionRequest {
    pub emoji: String,
}

/// Adds a task to the active project
///
/// # Errors
///
/// - `403 Forbidden`: Guests cannot create tasks
/// - `409 Conflict`: No active project
/// - `422 Unprocessable Entity`: Empty text
pub async fn add_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<AddTaskRequest>,
) -> ApiResult<ApiResponse<Task>> {
    req.validate()?;

    let task = state.store.add_task(&auth.username, &req.text).await?;
    Ok(ApiResponse::with_message("Task created", task))
}

/// Moves a task to the end of another column
///
/// # Errors
///
/// - `403 Forbidden`: Caller may not edit the task
/// - `404 Not Found`: Task is not in the `from` column
/// - `409 Conflict`: No active project
pub async fn move_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<MoveTaskRequest>,
) -> ApiResult<ApiResponse<Task>> {
    let task = state
        .store
        .move_task(&auth.username, &req.task_id, req.from, req.to)
        .await?;
    Ok(ApiResponse::data(task))
}

pub async fn task_details(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<String>,
) -> ApiResult<ApiResponse<TaskDetails>> {
    let details = state.store.task_details(&auth.username, &task_id).await?;
    Ok(ApiResponse::data(details))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<String>,
) -> ApiResult<ApiResponse<Vec<Comment>>> {
    let comments = state.store.comments(&auth.username, &task_id).await?;
    Ok(ApiResponse::data(comments))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<String>,
    Json(req): Json<AddCommentRequest>,
) -> ApiResult<ApiResponse<Comment>> {
    req.validate()?;

    let comment = state
        .store
        .add_comment(&auth.username, &task_id, &req.text)
        .await?;
    Ok(ApiResponse::with_message("Comment added", comment))
}

/// Adds a 👍, 🟢 or 🔴 reaction; reactions award no points
pub async fn add_reaction(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<String>,
    Json(req): Json<AddReactionRequest>,
) -> ApiResult<ApiResponse<Comment>> {
    let reaction = state
        .store
        .add_reaction(&auth.username, &task_id, &req.emoji)
        .await?;
    Ok(ApiResponse::data(reaction))
}
