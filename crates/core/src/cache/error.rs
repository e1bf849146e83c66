use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CacheError {
    /// Returns true if the error means the remote connection is gone.
    ///
    /// Connection-class errors move the client into the disconnected state;
    /// other errors only affect the operation that raised them.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, CacheError::ConnectionFailed(_))
    }
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
