use thiserror::Error;

/// Errors returned by admin authentication.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("too many failed login attempts, retry in {retry_after_secs}s")]
    Blocked { retry_after_secs: u64 },

    #[error("login is disabled")]
    LoginDisabled,

    #[error("missing or invalid token")]
    Unauthorized,
}

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Maps an [`AuthError`] to an HTTP status code.
pub fn auth_error_to_status_code(error: &AuthError) -> u16 {
    match error {
        AuthError::InvalidCredentials | AuthError::Unauthorized => 401,
        AuthError::Blocked { .. } => 429,
        AuthError::LoginDisabled => 403,
    }
}
