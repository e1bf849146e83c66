use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::operations::slugify;

/// The kinds of content that are tracked by slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Blog,
    Project,
}

impl ContentKind {
    /// Returns the key segment used for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Blog => "blog",
            ContentKind::Project => "project",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A blog post.
///
/// The slug is derived from the title and is the stable external identifier
/// used by routes and cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Archived posts leave the listing and appear in the archive aggregate.
    #[serde(default)]
    pub archived: bool,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Creates a new post, deriving its slug from the title.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&title),
            title,
            content: content.into(),
            excerpt: None,
            tags: Vec::new(),
            archived: false,
            published_at: now,
            updated_at: now,
        }
    }

    /// Sets the excerpt.
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Sets the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets a specific ID (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the publication timestamp (useful for testing).
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = published_at;
        self
    }

    /// Marks the post as archived.
    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project, deriving its slug from the title.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: slugify(&title),
            title,
            description: description.into(),
            technologies: Vec::new(),
            url: None,
            featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the technologies.
    pub fn with_technologies(mut self, technologies: Vec<String>) -> Self {
        self.technologies = technologies;
        self
    }

    /// Sets the project URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Marks the project as featured.
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Sets the creation timestamp (useful for testing).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_derives_slug() {
        let post = BlogPost::new("Hello, World!", "body");
        assert_eq!(post.slug, "hello-world");
        assert!(!post.archived);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_new_project_derives_slug() {
        let project = Project::new("Rust CMS", "A CMS").featured();
        assert_eq!(project.slug, "rust-cms");
        assert!(project.featured);
    }

    #[test]
    fn test_content_kind_display() {
        assert_eq!(ContentKind::Blog.to_string(), "blog");
        assert_eq!(ContentKind::Project.as_str(), "project");
    }

    #[test]
    fn test_post_serde_defaults() {
        let json = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "title": "T",
            "slug": "t",
            "content": "c",
            "excerpt": null,
            "published_at": "2024-06-15T10:30:00Z",
            "updated_at": "2024-06-15T10:30:00Z"
        });
        let post: BlogPost = serde_json::from_value(json).unwrap();
        assert!(!post.archived);
        assert!(post.tags.is_empty());
    }
}
