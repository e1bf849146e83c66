//! Cached project repository decorator.

use std::sync::Arc;

use async_trait::async_trait;

use folio_core::cache::{project_key, views_pattern, CacheTtl, PROJECT_LIST_KEY};
use folio_core::content::{ContentKind, Project};
use folio_core::storage::{ProjectRepository, Result};

use crate::cache::{invalidate, project_invalidation_keys, CacheAside};

/// Cached project repository decorator.
///
/// Same read-through and invalidation scheme as the blog decorator, with the
/// project listing as the only content aggregate.
pub struct CachedProjectRepository<R>
where
    R: ProjectRepository,
{
    repository: Arc<R>,
    cache: CacheAside,
}

impl<R> CachedProjectRepository<R>
where
    R: ProjectRepository,
{
    pub fn new(repository: Arc<R>, cache: CacheAside) -> Self {
        Self { repository, cache }
    }

    async fn invalidate_project(&self, slug: &str, new_slug: Option<&str>) {
        let keys = project_invalidation_keys(slug, new_slug);
        invalidate(self.cache.client(), &keys).await;
    }
}

#[async_trait]
impl<R> ProjectRepository for CachedProjectRepository<R>
where
    R: ProjectRepository + 'static,
{
    async fn get_project(&self, slug: &str) -> Result<Option<Project>> {
        self.cache
            .get_or_compute(&project_key(slug), CacheTtl::Short, || {
                self.repository.get_project(slug)
            })
            .await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.cache
            .get_or_compute(PROJECT_LIST_KEY, CacheTtl::Short, || {
                self.repository.list_projects()
            })
            .await
    }

    async fn count_projects(&self) -> Result<u64> {
        self.repository.count_projects().await
    }

    async fn create_project(&self, project: &Project) -> Result<()> {
        self.repository.create_project(project).await?;
        self.invalidate_project(&project.slug, None).await;

        tracing::debug!(slug = %project.slug, title = %project.title, "Project created");
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> Result<Project> {
        let previous = self.repository.update_project(project).await?;
        self.invalidate_project(&previous.slug, Some(&project.slug))
            .await;

        tracing::debug!(old_slug = %previous.slug, slug = %project.slug, "Project updated");
        Ok(previous)
    }

    async fn delete_project(&self, slug: &str) -> Result<()> {
        self.repository.delete_project(slug).await?;
        self.invalidate_project(slug, None).await;
        self.cache
            .client()
            .delete_pattern(&views_pattern(ContentKind::Project, slug))
            .await;

        tracing::debug!(slug, "Project deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use folio_core::cache::Cache;

    use crate::cache::testing::{connected_client, FaultyCache};
    use crate::storage::inmemory::InMemoryRepository;

    async fn setup() -> (CachedProjectRepository<InMemoryRepository>, Arc<FaultyCache>) {
        let (client, remote) = connected_client().await;
        let aside = CacheAside::new(client, CacheTtl::SHORT, CacheTtl::LONG);
        let cached = CachedProjectRepository::new(Arc::new(InMemoryRepository::new()), aside);
        (cached, remote)
    }

    #[tokio::test]
    async fn test_get_project_populates_cache() {
        let (cached, remote) = setup().await;
        cached
            .create_project(&Project::new("Folio", "A CMS"))
            .await
            .unwrap();

        let project = cached.get_project("folio").await.unwrap();

        assert_eq!(project.map(|p| p.title), Some("Folio".to_string()));
        assert!(remote.store().exists("project:folio").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_invalidates_listing() {
        let (cached, remote) = setup().await;
        cached
            .create_project(&Project::new("First", "One"))
            .await
            .unwrap();
        assert_eq!(cached.list_projects().await.unwrap().len(), 1);
        assert!(remote.store().exists("projects").await.unwrap());

        cached
            .create_project(&Project::new("Second", "Two"))
            .await
            .unwrap();

        assert!(!remote.store().exists("projects").await.unwrap());
        assert_eq!(cached.list_projects().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_serves_fresh_value() {
        let (cached, _remote) = setup().await;
        let project = Project::new("Folio", "A CMS");
        cached.create_project(&project).await.unwrap();
        cached.get_project("folio").await.unwrap();

        let mut updated = project.clone();
        updated.description = "A cached CMS".to_string();
        cached.update_project(&updated).await.unwrap();

        let fetched = cached.get_project("folio").await.unwrap().unwrap();
        assert_eq!(fetched.description, "A cached CMS");
    }

    #[tokio::test]
    async fn test_delete_invalidates_item() {
        let (cached, remote) = setup().await;
        cached
            .create_project(&Project::new("Folio", "A CMS"))
            .await
            .unwrap();
        cached.get_project("folio").await.unwrap();

        cached.delete_project("folio").await.unwrap();

        assert!(!remote.store().exists("project:folio").await.unwrap());
        assert!(cached.get_project("folio").await.unwrap().is_none());
    }
}
