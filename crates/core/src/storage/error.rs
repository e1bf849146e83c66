use thiserror::Error;

use crate::content::ContentError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Shorthand for a missing blog post.
    pub fn post_not_found(slug: &str) -> Self {
        RepositoryError::NotFound {
            entity_type: "BlogPost",
            id: slug.to_string(),
        }
    }

    /// Shorthand for a missing project.
    pub fn project_not_found(slug: &str) -> Self {
        RepositoryError::NotFound {
            entity_type: "Project",
            id: slug.to_string(),
        }
    }
}

impl From<ContentError> for RepositoryError {
    fn from(err: ContentError) -> Self {
        RepositoryError::InvalidData(err.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
