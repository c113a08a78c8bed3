/// Project endpoints
///
/// # Endpoints
///
/// - `POST /v1/projects` - Create a project (+50 points)
/// - `POST /v1/projects/:project_id/select` - Make a project active
/// - `PUT /v1/projects/current` - Update the active project's settings
/// - `GET /v1/projects/current/export` - Download the active project as JSON

use crate::{app::AppState, error::ApiResult, response::ApiResponse};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::project::{Project, UpdateProject},
};
use validator::Validate;

/// Create project request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(max = 100, message = "Project name must be at most 100 characters"))]
    pub name: String,
}

/// Update project request; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(max = 100, message = "Project name must be at most 100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub color: Option<String>,
}

/// Selection result
#[derive(Debug, Serialize)]
pub struct SelectProjectResponse {
    /// False when the id does not belong to the caller
    pub selected: bool,

    pub active_project: Option<Project>,
}

/// Creates a project; the caller's first project becomes active
///
/// # Errors
///
/// - `403 Forbidden`: Guests cannot create projects
/// - `422 Unprocessable Entity`: Empty name
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<ApiResponse<Project>> {
    req.validate()?;

    let project = state.store.create_project(&auth.username, &req.name).await?;
    Ok(ApiResponse::with_message("Project created", project))
}

/// Selects the active project
///
/// Unknown ids are not an error; the active project stays as it was.
pub async fn select_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<String>,
) -> ApiResult<ApiResponse<SelectProjectResponse>> {
    let selected = state
        .store
        .select_project(&auth.username, &project_id)
        .await?;
    let active_project = state.store.active_project(&auth.username).await?;

    Ok(ApiResponse::data(SelectProjectResponse {
        selected,
        active_project,
    }))
}

/// Updates name, description or color of the active project
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<ApiResponse<Project>> {
    req.validate()?;

    let patch = UpdateProject {
        name: req.name,
        description: req.description,
        color: req.color,
    };
    let project = state.store.update_project(&auth.username, patch).await?;
    Ok(ApiResponse::with_message("Project updated", project))
}

/// Exports the active project as a JSON attachment
pub async fn export_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<impl IntoResponse> {
    let export = state.store.export_project(&auth.username).await?;
    let disposition = format!(
        "attachment; filename=\"{}.json\"",
        export.project.id
    );

    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(export)))
}
