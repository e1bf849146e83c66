//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use folio_core::content::{
    build_archive, published_posts, sort_projects, validate_post, validate_project, ArchiveMonth,
    BlogPost, Project,
};
use folio_core::storage::{BlogRepository, ProjectRepository, RepositoryError, Result};

/// In-memory source of truth.
///
/// Uses HashMaps keyed by ID wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Slugs are unique per content kind. Data is lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    posts: Arc<RwLock<HashMap<Uuid, BlogPost>>>,
    projects: Arc<RwLock<HashMap<Uuid, Project>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            posts: Arc::new(RwLock::new(HashMap::new())),
            projects: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn slug_taken<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    slug: &str,
    except: Uuid,
    fields: impl Fn(&T) -> (Uuid, &str),
) -> bool {
    items.into_iter().any(|item| {
        let (id, item_slug) = fields(item);
        id != except && item_slug == slug
    })
}

fn post_fields(post: &BlogPost) -> (Uuid, &str) {
    (post.id, post.slug.as_str())
}

fn project_fields(project: &Project) -> (Uuid, &str) {
    (project.id, project.slug.as_str())
}

#[async_trait]
impl BlogRepository for InMemoryRepository {
    async fn get_post(&self, slug: &str) -> Result<Option<BlogPost>> {
        let posts = self.posts.read().await;
        Ok(posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<BlogPost>> {
        let posts = self.posts.read().await;
        let all: Vec<BlogPost> = posts.values().cloned().collect();
        Ok(published_posts(&all))
    }

    async fn archive(&self) -> Result<Vec<ArchiveMonth>> {
        let posts = self.posts.read().await;
        let all: Vec<BlogPost> = posts.values().cloned().collect();
        Ok(build_archive(&all))
    }

    async fn count_posts(&self, archived: bool) -> Result<u64> {
        let posts = self.posts.read().await;
        Ok(posts.values().filter(|p| p.archived == archived).count() as u64)
    }

    async fn create_post(&self, post: &BlogPost) -> Result<()> {
        validate_post(post)?;
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) || slug_taken(posts.values(), &post.slug, post.id, post_fields)
        {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "BlogPost",
                id: post.slug.clone(),
            });
        }
        posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn update_post(&self, post: &BlogPost) -> Result<BlogPost> {
        validate_post(post)?;
        let mut posts = self.posts.write().await;
        if slug_taken(posts.values(), &post.slug, post.id, post_fields) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "BlogPost",
                id: post.slug.clone(),
            });
        }
        let Some(previous) = posts.get(&post.id).cloned() else {
            return Err(RepositoryError::NotFound {
                entity_type: "BlogPost",
                id: post.id.to_string(),
            });
        };
        posts.insert(post.id, post.clone());
        Ok(previous)
    }

    async fn delete_post(&self, slug: &str) -> Result<()> {
        let mut posts = self.posts.write().await;
        let id = posts
            .values()
            .find(|p| p.slug == slug)
            .map(|p| p.id)
            .ok_or_else(|| RepositoryError::post_not_found(slug))?;
        posts.remove(&id);
        Ok(())
    }

    async fn set_archived(&self, slug: &str, archived: bool) -> Result<BlogPost> {
        let mut posts = self.posts.write().await;
        let post = posts
            .values_mut()
            .find(|p| p.slug == slug)
            .ok_or_else(|| RepositoryError::post_not_found(slug))?;
        post.archived = archived;
        post.updated_at = Utc::now();
        Ok(post.clone())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryRepository {
    async fn get_project(&self, slug: &str) -> Result<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.values().find(|p| p.slug == slug).cloned())
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let projects = self.projects.read().await;
        let mut all: Vec<Project> = projects.values().cloned().collect();
        sort_projects(&mut all);
        Ok(all)
    }

    async fn count_projects(&self) -> Result<u64> {
        Ok(self.projects.read().await.len() as u64)
    }

    async fn create_project(&self, project: &Project) -> Result<()> {
        validate_project(project)?;
        let mut projects = self.projects.write().await;
        if projects.contains_key(&project.id)
            || slug_taken(projects.values(), &project.slug, project.id, project_fields)
        {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Project",
                id: project.slug.clone(),
            });
        }
        projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> Result<Project> {
        validate_project(project)?;
        let mut projects = self.projects.write().await;
        if slug_taken(projects.values(), &project.slug, project.id, project_fields) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Project",
                id: project.slug.clone(),
            });
        }
        let Some(previous) = projects.get(&project.id).cloned() else {
            return Err(RepositoryError::NotFound {
                entity_type: "Project",
                id: project.id.to_string(),
            });
        };
        projects.insert(project.id, project.clone());
        Ok(previous)
    }

    async fn delete_project(&self, slug: &str) -> Result<()> {
        let mut projects = self.projects.write().await;
        let id = projects
            .values()
            .find(|p| p.slug == slug)
            .map(|p| p.id)
            .ok_or_else(|| RepositoryError::project_not_found(slug))?;
        projects.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(title: &str) -> BlogPost {
        BlogPost::new(title, "Body")
    }

    #[tokio::test]
    async fn test_post_create_and_get() {
        let repo = InMemoryRepository::new();
        let post = post("Hello World");

        repo.create_post(&post).await.unwrap();

        let fetched = repo.get_post("hello-world").await.unwrap();
        assert_eq!(fetched, Some(post));
    }

    #[tokio::test]
    async fn test_post_get_nonexistent() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_post("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_post_duplicate_slug_rejected() {
        let repo = InMemoryRepository::new();
        repo.create_post(&post("Hello World")).await.unwrap();

        let result = repo.create_post(&post("Hello, world!")).await;

        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_post_invalid_rejected() {
        let repo = InMemoryRepository::new();
        let result = repo.create_post(&BlogPost::new("Title", "   ")).await;
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_post_update_returns_previous() {
        let repo = InMemoryRepository::new();
        let original = post("First Title");
        repo.create_post(&original).await.unwrap();

        let mut renamed = original.clone();
        renamed.title = "Second Title".to_string();
        renamed.slug = "second-title".to_string();
        let previous = repo.update_post(&renamed).await.unwrap();

        assert_eq!(previous.slug, "first-title");
        assert!(repo.get_post("first-title").await.unwrap().is_none());
        assert!(repo.get_post("second-title").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_post_update_nonexistent() {
        let repo = InMemoryRepository::new();
        let result = repo.update_post(&post("Ghost")).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_post_delete() {
        let repo = InMemoryRepository::new();
        repo.create_post(&post("Doomed")).await.unwrap();

        repo.delete_post("doomed").await.unwrap();

        assert!(repo.get_post("doomed").await.unwrap().is_none());
        assert!(repo.delete_post("doomed").await.is_err());
    }

    #[tokio::test]
    async fn test_archive_moves_post_out_of_listing() {
        let repo = InMemoryRepository::new();
        let published_at = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        repo.create_post(&post("Keep")).await.unwrap();
        repo.create_post(&post("Old News").with_published_at(published_at))
            .await
            .unwrap();

        let archived = repo.set_archived("old-news", true).await.unwrap();

        assert!(archived.archived);
        let listed = repo.list_posts().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].slug, "keep");

        let archive = repo.archive().await.unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!((archive[0].year, archive[0].month), (2024, 3));
        assert_eq!(repo.count_posts(true).await.unwrap(), 1);
        assert_eq!(repo.count_posts(false).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_project_crud() {
        let repo = InMemoryRepository::new();
        let project = Project::new("Folio", "A CMS");
        repo.create_project(&project).await.unwrap();

        let mut updated = project.clone();
        updated.description = "A cached CMS".to_string();
        let previous = repo.update_project(&updated).await.unwrap();
        assert_eq!(previous.description, "A CMS");

        assert_eq!(repo.count_projects().await.unwrap(), 1);
        repo.delete_project("folio").await.unwrap();
        assert!(repo.get_project("folio").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_projects_listed_featured_first() {
        let repo = InMemoryRepository::new();
        repo.create_project(&Project::new("Plain", "One")).await.unwrap();
        repo.create_project(&Project::new("Star", "Two").featured())
            .await
            .unwrap();

        let listed = repo.list_projects().await.unwrap();

        assert_eq!(listed[0].slug, "star");
        assert_eq!(listed[1].slug, "plain");
    }
}
