//! View analytics and dashboard statistics.

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use folio_core::analytics::{DashboardStats, ViewCount};
use folio_core::cache::{
    parse_counter, view_total_key, view_visitor_key, CacheTtl, DASHBOARD_STATS_KEY,
};
use folio_core::content::ContentKind;
use folio_core::storage::{BlogRepository, ProjectRepository, RepositoryError, Result};

use crate::cache::{CacheAside, CacheClient};

/// Counts unique views per item.
///
/// A visitor is counted once per item inside the dedup window. Counts are
/// approximate: two concurrent first views from one visitor may both count.
#[derive(Clone)]
pub struct ViewTracker {
    client: CacheClient,
    dedup_window: Duration,
}

impl ViewTracker {
    pub fn new(client: CacheClient, dedup_window: Duration) -> Self {
        Self {
            client,
            dedup_window,
        }
    }

    /// Records a view. Returns true if it was counted.
    pub async fn record_view(&self, kind: ContentKind, slug: &str, visitor: &str) -> bool {
        let visitor_key = view_visitor_key(kind, slug, visitor);
        if self.client.exists(&visitor_key).await {
            return false;
        }

        self.client
            .set(&visitor_key, "1", Some(self.dedup_window))
            .await;
        let total = self.client.increment(&view_total_key(kind, slug)).await;
        tracing::trace!(%kind, slug, total, "View recorded");
        true
    }

    /// Records a view on a detached task.
    ///
    /// The caller never waits for the result; failures end up in the log.
    pub fn record_view_detached(
        &self,
        kind: ContentKind,
        slug: impl Into<String>,
        visitor: impl Into<String>,
    ) -> JoinHandle<()> {
        let tracker = self.clone();
        let slug = slug.into();
        let visitor = visitor.into();
        tokio::spawn(async move {
            let counted = tracker.record_view(kind, &slug, &visitor).await;
            if !counted {
                tracing::trace!(%kind, slug = %slug, "Repeat view ignored");
            }
        })
    }

    /// Total counted views of an item.
    pub async fn total_views(&self, kind: ContentKind, slug: &str) -> ViewCount {
        let key = view_total_key(kind, slug);
        let bytes = self.client.get_bytes(&key).await;
        let views = parse_counter(bytes.as_deref()).unwrap_or_else(|err| {
            tracing::warn!(key = %key, error = %err, "View counter is not an integer");
            0
        });
        ViewCount {
            slug: slug.to_string(),
            views,
        }
    }
}

/// Returns dashboard statistics, cached for `ttl`.
pub async fn dashboard_stats(
    cache: &CacheAside,
    posts: &dyn BlogRepository,
    projects: &dyn ProjectRepository,
    ttl: Duration,
) -> Result<DashboardStats> {
    cache
        .get_or_compute(DASHBOARD_STATS_KEY, CacheTtl::Custom(ttl), || async {
            Ok::<_, RepositoryError>(DashboardStats {
                published_posts: posts.count_posts(false).await?,
                archived_posts: posts.count_posts(true).await?,
                projects: projects.count_projects().await?,
                generated_at: Utc::now(),
            })
        })
        .await
}
