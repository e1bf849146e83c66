//! API request types for content operations.
//!
//! Pure data types. Applying an update returns the new value; the caller
//! compares slugs to find out whether the identifier changed.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::operations::slugify;
use super::types::{BlogPost, Project};

/// Request payload for creating a blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreatePostRequest {
    /// Converts the request into a new post.
    pub fn into_post(self) -> BlogPost {
        let mut post = BlogPost::new(self.title, self.content).with_tags(self.tags);
        post.excerpt = self.excerpt;
        post
    }
}

/// Request payload for updating a blog post. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdatePostRequest {
    /// Applies the update to a post. A new title re-derives the slug.
    pub fn apply(self, mut post: BlogPost) -> BlogPost {
        if let Some(title) = self.title {
            post.slug = slugify(&title);
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = Some(excerpt);
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
        post.updated_at = Utc::now();
        post
    }
}

/// Request payload for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl CreateProjectRequest {
    /// Converts the request into a new project.
    pub fn into_project(self) -> Project {
        let mut project =
            Project::new(self.title, self.description).with_technologies(self.technologies);
        project.url = self.url;
        project.featured = self.featured;
        project
    }
}

/// Request payload for updating a project. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl UpdateProjectRequest {
    /// Applies the update to a project. A new title re-derives the slug.
    pub fn apply(self, mut project: Project) -> Project {
        if let Some(title) = self.title {
            project.slug = slugify(&title);
            project.title = title;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(technologies) = self.technologies {
            project.technologies = technologies;
        }
        if let Some(url) = self.url {
            project.url = Some(url);
        }
        if let Some(featured) = self.featured {
            project.featured = featured;
        }
        project.updated_at = Utc::now();
        project
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_request() {
        let request = CreatePostRequest {
            title: "First Post".to_string(),
            content: "Hello".to_string(),
            excerpt: Some("Hi".to_string()),
            tags: vec!["rust".to_string()],
        };
        let post = request.into_post();
        assert_eq!(post.slug, "first-post");
        assert_eq!(post.excerpt.as_deref(), Some("Hi"));
        assert_eq!(post.tags, vec!["rust".to_string()]);
    }

    #[test]
    fn test_update_post_title_changes_slug() {
        let post = BlogPost::new("Old Title", "Body");
        let id = post.id;

        let updated = UpdatePostRequest {
            title: Some("New Title".to_string()),
            ..Default::default()
        }
        .apply(post);

        assert_eq!(updated.id, id);
        assert_eq!(updated.slug, "new-title");
        assert_eq!(updated.content, "Body");
    }

    #[test]
    fn test_update_post_without_title_keeps_slug() {
        let post = BlogPost::new("Title", "Body");
        let updated = UpdatePostRequest {
            content: Some("New body".to_string()),
            ..Default::default()
        }
        .apply(post);

        assert_eq!(updated.slug, "title");
        assert_eq!(updated.content, "New body");
    }

    #[test]
    fn test_update_project() {
        let project = Project::new("Folio", "CMS");
        let updated = UpdateProjectRequest {
            featured: Some(true),
            url: Some("https://example.com".to_string()),
            ..Default::default()
        }
        .apply(project);

        assert!(updated.featured);
        assert_eq!(updated.url.as_deref(), Some("https://example.com"));
        assert_eq!(updated.slug, "folio");
    }

    #[test]
    fn test_update_request_deserializes_partial() {
        let request: UpdatePostRequest = serde_json::from_str(r#"{"title":"X"}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("X"));
        assert!(request.content.is_none());
    }
}
