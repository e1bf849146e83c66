//! Admin dashboard and cache maintenance endpoints.

use axum::{extract::State, http::StatusCode, Json};

use folio_core::analytics::DashboardStats;

use super::{authz::AdminSession, AppError};
use crate::{analytics, state::AppState};

/// GET /api/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = analytics::dashboard_stats(
        &state.aside,
        state.posts.as_ref(),
        state.projects.as_ref(),
        state.dashboard_stats_ttl,
    )
    .await?;
    Ok(Json(stats))
}

/// POST /api/admin/cache/reconnect
///
/// Starts a fresh connection cycle with the attempt counter reset. Returns
/// before the attempt completes.
pub async fn reconnect_cache(State(state): State<AppState>, _admin: AdminSession) -> StatusCode {
    state.cache.reconnect();
    StatusCode::ACCEPTED
}

/// POST /api/admin/cache/flush
pub async fn flush_cache(State(state): State<AppState>, _admin: AdminSession) -> StatusCode {
    tracing::warn!("Flushing cache");
    state.cache.flush_all().await;
    StatusCode::NO_CONTENT
}
