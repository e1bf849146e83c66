use async_trait::async_trait;

use crate::content::{ArchiveMonth, BlogPost, Project};

use super::Result;

/// Source of truth for blog posts.
///
/// Posts are addressed by slug. Slugs are unique across posts.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Gets a post by its slug.
    async fn get_post(&self, slug: &str) -> Result<Option<BlogPost>>;

    /// Lists non-archived posts, newest first.
    async fn list_posts(&self) -> Result<Vec<BlogPost>>;

    /// Aggregates archived posts by publication month.
    async fn archive(&self) -> Result<Vec<ArchiveMonth>>;

    /// Counts posts with the given archived flag.
    async fn count_posts(&self, archived: bool) -> Result<u64>;

    /// Creates a new post.
    async fn create_post(&self, post: &BlogPost) -> Result<()>;

    /// Replaces the post with the same ID and returns the previous version.
    ///
    /// The slug may change as part of the update.
    async fn update_post(&self, post: &BlogPost) -> Result<BlogPost>;

    /// Deletes a post by its slug.
    async fn delete_post(&self, slug: &str) -> Result<()>;

    /// Sets the archived flag of a post and returns the updated post.
    async fn set_archived(&self, slug: &str, archived: bool) -> Result<BlogPost>;
}

/// Source of truth for portfolio projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Gets a project by its slug.
    async fn get_project(&self, slug: &str) -> Result<Option<Project>>;

    /// Lists projects, featured first then newest first.
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Counts all projects.
    async fn count_projects(&self) -> Result<u64>;

    /// Creates a new project.
    async fn create_project(&self, project: &Project) -> Result<()>;

    /// Replaces the project with the same ID and returns the previous version.
    async fn update_project(&self, project: &Project) -> Result<Project>;

    /// Deletes a project by its slug.
    async fn delete_project(&self, slug: &str) -> Result<()>;
}
