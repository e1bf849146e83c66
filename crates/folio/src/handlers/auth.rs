//! Admin login endpoints.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::auth::{parse_bearer_token, AuthError};

use super::{authz::AdminSession, AppError};
use crate::{context::RequestContext, state::AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WhoAmI {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state
        .auth
        .login(&ctx.client_id, &payload.username, &payload.password)
        .await?;

    tracing::info!(
        request_id = %ctx.request_id,
        username = %session.username,
        client = %ctx.client_id,
        "Admin logged in"
    );
    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
    }))
}

/// POST /api/auth/logout
///
/// Revokes the bearer token for the rest of its lifetime.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_bearer_token)
        .ok_or(AuthError::Unauthorized)?;

    state.auth.logout(token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn me(AdminSession(session): AdminSession) -> Json<WhoAmI> {
    Json(WhoAmI {
        username: session.username,
        expires_at: session.expires_at,
    })
}
