use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use folio_core::auth::{auth_error_to_status_code, AuthError};
use folio_core::storage::{repository_error_to_status_code, RepositoryError};

/// Handler error that wraps `anyhow::Error`.
///
/// Repository and authentication errors keep their status codes; anything
/// else is a 500.
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        let code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(repo_error)
        } else if let Some(auth_error) = self.0.downcast_ref::<AuthError>() {
            auth_error_to_status_code(auth_error)
        } else {
            500
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let mut response = (status, Json(json!({ "error": self.0.to_string() }))).into_response();
        if let Some(AuthError::Blocked { retry_after_secs }) = self.0.downcast_ref::<AuthError>() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(*retry_after_secs));
        }
        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
