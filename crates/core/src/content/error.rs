use thiserror::Error;

/// Errors that can occur when validating blog posts and projects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Title too long (max 200 characters)")]
    TitleTooLong,
    #[error("Title must contain at least one letter or digit")]
    EmptySlug,
    #[error("Content cannot be empty")]
    EmptyContent,
}
