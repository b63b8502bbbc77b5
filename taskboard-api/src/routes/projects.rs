/// Project endpoints
///
/// CRUD over projects, scoped to the authenticated owner. Every lookup
/// goes through the scoped model queries, so a project owned by another
/// user yields the same 404 as a project that does not exist.
///
/// # Endpoints
///
/// - `POST /projects` - create
/// - `GET /projects` - list caller's projects
/// - `GET /projects/:id` - fetch one
/// - `PATCH /projects/:id` - full-replacement update
/// - `DELETE /projects/:id` - delete (tasks cascade)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::middleware::AuthContext,
    models::project::{Project, ProjectData},
};
use uuid::Uuid;

/// Create/update payload
///
/// The update verb is PATCH but the semantics are full replacement:
/// omitting `description` clears it.
#[derive(Debug, Deserialize)]
pub struct ProjectPayload {
    /// Project name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Deletion acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

impl From<ProjectPayload> for ProjectData {
    fn from(payload: ProjectPayload) -> Self {
        ProjectData {
            name: payload.name,
            description: payload.description,
        }
    }
}

/// Creates a project owned by the caller
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<ProjectPayload>,
) -> ApiResult<Json<Project>> {
    let project = Project::create(&state.db, auth.user_id, payload.into()).await?;
    Ok(Json(project))
}

/// Lists the caller's projects
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Project>>> {
    let projects = Project::list_by_owner(&state.db, auth.user_id).await?;
    Ok(Json(projects))
}

/// Fetches one project
///
/// # Errors
///
/// `404 Not Found` if the project is absent or owned by someone else.
pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = Project::find_by_id_for_owner(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

/// Replaces a project's fields
///
/// Full replacement of name and description.
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProjectPayload>,
) -> ApiResult<Json<Project>> {
    let project = Project::replace(&state.db, id, auth.user_id, payload.into())
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;
    Ok(Json(project))
}

/// Deletes a project and, through the schema cascade, all its tasks
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Project::delete(&state.db, id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Project deleted".to_string(),
    }))
}
