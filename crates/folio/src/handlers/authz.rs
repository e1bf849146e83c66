//! Admin authorization for API handlers.
//!
//! Handlers that mutate content take an [`AdminSession`] argument; requests
//! without a valid, non-revoked bearer token are rejected with 401.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use folio_core::auth::{parse_bearer_token, AuthError};

use super::AppError;
use crate::{auth::Session, state::AppState};

/// The verified session of the requesting admin.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

/// Extracts the bearer token of a request, if any.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_bearer_token)
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::Unauthorized)?;
        let session = state.auth.verify(token).await?;
        Ok(AdminSession(session))
    }
}
