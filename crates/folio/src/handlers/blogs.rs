use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use folio_core::analytics::ViewCount;
use folio_core::content::{
    ArchiveMonth, BlogPost, ContentKind, CreatePostRequest, UpdatePostRequest,
};
use folio_core::storage::RepositoryError;

use super::{authz::AdminSession, AppError};
use crate::{context::RequestContext, state::AppState};

/// List published posts (GET /api/blogs).
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>, AppError> {
    Ok(Json(state.posts.list_posts().await?))
}

/// Archived posts grouped by month (GET /api/blogs/archive).
pub async fn archive(State(state): State<AppState>) -> Result<Json<Vec<ArchiveMonth>>, AppError> {
    Ok(Json(state.posts.archive().await?))
}

/// Get a post by slug (GET /api/blogs/{slug}).
///
/// Counts a view without waiting for it.
pub async fn get_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, AppError> {
    let post = state
        .posts
        .get_post(&slug)
        .await?
        .ok_or_else(|| RepositoryError::post_not_found(&slug))?;

    state
        .views
        .record_view_detached(ContentKind::Blog, slug, ctx.client_id);
    Ok(Json(post))
}

/// View count of a post (GET /api/blogs/{slug}/views).
pub async fn post_views(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Json<ViewCount> {
    Json(state.views.total_views(ContentKind::Blog, &slug).await)
}

/// Create a post (POST /api/blogs).
pub async fn create_post(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let post = payload.into_post();
    state.posts.create_post(&post).await?;

    tracing::info!(slug = %post.slug, "Created post");
    Ok((StatusCode::CREATED, Json(post)))
}

/// Update a post (PUT /api/blogs/{slug}).
///
/// A new title re-derives the slug.
pub async fn update_post(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(slug): Path<String>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<BlogPost>, AppError> {
    let current = state
        .posts
        .get_post(&slug)
        .await?
        .ok_or_else(|| RepositoryError::post_not_found(&slug))?;

    let updated = payload.apply(current);
    state.posts.update_post(&updated).await?;

    tracing::info!(old_slug = %slug, slug = %updated.slug, "Updated post");
    Ok(Json(updated))
}

/// Delete a post (DELETE /api/blogs/{slug}).
pub async fn delete_post(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    state.posts.delete_post(&slug).await?;

    tracing::info!(%slug, "Deleted post");
    Ok(StatusCode::NO_CONTENT)
}

/// Archive a post (POST /api/blogs/{slug}/archive).
pub async fn archive_post(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, AppError> {
    Ok(Json(state.posts.set_archived(&slug, true).await?))
}

/// Move a post back out of the archive (POST /api/blogs/{slug}/unarchive).
pub async fn unarchive_post(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, AppError> {
    Ok(Json(state.posts.set_archived(&slug, false).await?))
}
