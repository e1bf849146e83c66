use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use folio_core::analytics::ViewCount;
use folio_core::content::{ContentKind, CreateProjectRequest, Project, UpdateProjectRequest};
use folio_core::storage::RepositoryError;

use super::{authz::AdminSession, AppError};
use crate::{context::RequestContext, state::AppState};

/// List projects (GET /api/projects).
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.projects.list_projects().await?))
}

/// Get a project by slug (GET /api/projects/{slug}).
pub async fn get_project(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(slug): Path<String>,
) -> Result<Json<Project>, AppError> {
    let project = state
        .projects
        .get_project(&slug)
        .await?
        .ok_or_else(|| RepositoryError::project_not_found(&slug))?;

    state
        .views
        .record_view_detached(ContentKind::Project, slug, ctx.client_id);
    Ok(Json(project))
}

/// View count of a project (GET /api/projects/{slug}/views).
pub async fn project_views(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Json<ViewCount> {
    Json(state.views.total_views(ContentKind::Project, &slug).await)
}

/// Create a project (POST /api/projects).
pub async fn create_project(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let project = payload.into_project();
    state.projects.create_project(&project).await?;

    tracing::info!(slug = %project.slug, "Created project");
    Ok((StatusCode::CREATED, Json(project)))
}

/// Update a project (PUT /api/projects/{slug}).
pub async fn update_project(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    let current = state
        .projects
        .get_project(&slug)
        .await?
        .ok_or_else(|| RepositoryError::project_not_found(&slug))?;

    let updated = payload.apply(current);
    state.projects.update_project(&updated).await?;

    tracing::info!(old_slug = %slug, slug = %updated.slug, "Updated project");
    Ok(Json(updated))
}

/// Delete a project (DELETE /api/projects/{slug}).
pub async fn delete_project(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    state.projects.delete_project(&slug).await?;

    tracing::info!(%slug, "Deleted project");
    Ok(StatusCode::NO_CONTENT)
}
