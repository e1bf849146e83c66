//! Cached blog repository decorator.
//!
//! Wraps a `BlogRepository` implementation with the cache-aside pattern.

use std::sync::Arc;

use async_trait::async_trait;

use folio_core::cache::{blog_key, views_pattern, CacheTtl, BLOG_ARCHIVE_KEY, BLOG_LIST_KEY};
use folio_core::content::{ArchiveMonth, BlogPost, ContentKind};
use folio_core::storage::{BlogRepository, Result};

use crate::cache::{blog_invalidation_keys, invalidate, CacheAside};

/// Cached blog repository decorator.
///
/// - **Reads**: served through the read-through helper; single posts use the
///   short TTL class, the archive aggregate the long one
/// - **Writes**: persist to the repository, then invalidate the post key of
///   every touched slug and the blog aggregates
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
pub struct CachedBlogRepository<R>
where
    R: BlogRepository,
{
    repository: Arc<R>,
    cache: CacheAside,
}

impl<R> CachedBlogRepository<R>
where
    R: BlogRepository,
{
    pub fn new(repository: Arc<R>, cache: CacheAside) -> Self {
        Self { repository, cache }
    }

    async fn invalidate_post(&self, slug: &str, new_slug: Option<&str>) {
        let keys = blog_invalidation_keys(slug, new_slug);
        invalidate(self.cache.client(), &keys).await;
    }
}

#[async_trait]
impl<R> BlogRepository for CachedBlogRepository<R>
where
    R: BlogRepository + 'static,
{
    async fn get_post(&self, slug: &str) -> Result<Option<BlogPost>> {
        self.cache
            .get_or_compute(&blog_key(slug), CacheTtl::Short, || {
                self.repository.get_post(slug)
            })
            .await
    }

    async fn list_posts(&self) -> Result<Vec<BlogPost>> {
        self.cache
            .get_or_compute(BLOG_LIST_KEY, CacheTtl::Short, || {
                self.repository.list_posts()
            })
            .await
    }

    async fn archive(&self) -> Result<Vec<ArchiveMonth>> {
        self.cache
            .get_or_compute(BLOG_ARCHIVE_KEY, CacheTtl::Long, || {
                self.repository.archive()
            })
            .await
    }

    async fn count_posts(&self, archived: bool) -> Result<u64> {
        self.repository.count_posts(archived).await
    }

    async fn create_post(&self, post: &BlogPost) -> Result<()> {
        self.repository.create_post(post).await?;
        self.invalidate_post(&post.slug, None).await;

        tracing::debug!(slug = %post.slug, title = %post.title, "Post created");
        Ok(())
    }

    async fn update_post(&self, post: &BlogPost) -> Result<BlogPost> {
        let previous = self.repository.update_post(post).await?;
        self.invalidate_post(&previous.slug, Some(&post.slug)).await;

        tracing::debug!(old_slug = %previous.slug, slug = %post.slug, "Post updated");
        Ok(previous)
    }

    async fn delete_post(&self, slug: &str) -> Result<()> {
        self.repository.delete_post(slug).await?;
        self.invalidate_post(slug, None).await;

        let removed = self
            .cache
            .client()
            .delete_pattern(&views_pattern(ContentKind::Blog, slug))
            .await;

        tracing::debug!(slug, view_keys_removed = removed, "Post deleted");
        Ok(())
    }

    async fn set_archived(&self, slug: &str, archived: bool) -> Result<BlogPost> {
        let post = self.repository.set_archived(slug, archived).await?;
        self.invalidate_post(slug, None).await;

        tracing::debug!(slug, archived, "Post archive flag changed");
        Ok(post)
    }
}
