//! Application state shared by all request handlers.

use std::sync::Arc;
use std::time::Duration;

use folio_core::storage::{BlogRepository, ProjectRepository};

use crate::analytics::ViewTracker;
use crate::auth::AdminAuth;
use crate::cache::{CacheAside, CacheClient};
use crate::config::Config;
use crate::storage::{CachedBlogRepository, CachedProjectRepository, InMemoryRepository};

/// Shared application state.
///
/// Cloned for each request handler. Built once at startup around a single
/// [`CacheClient`], which owns the remote connection state.
#[derive(Clone)]
pub struct AppState {
    /// Cache client (remote with fallback).
    pub cache: CacheClient,
    /// Read-through helper with the configured TTL classes.
    pub aside: CacheAside,
    /// Blog repository (cached, wraps the source of truth).
    pub posts: Arc<dyn BlogRepository>,
    /// Project repository (cached, wraps the source of truth).
    pub projects: Arc<dyn ProjectRepository>,
    pub views: ViewTracker,
    pub auth: AdminAuth,
    pub dashboard_stats_ttl: Duration,
    /// Whether client identity may come from `x-forwarded-for`/`x-real-ip`.
    pub trust_proxy_headers: bool,
}

impl AppState {
    /// Creates the state with an empty in-memory source of truth.
    pub fn new(config: &Config, cache: CacheClient) -> Self {
        let repository = Arc::new(InMemoryRepository::new());
        let aside = CacheAside::new(cache.clone(), config.short_ttl(), config.long_ttl());

        Self {
            posts: Arc::new(CachedBlogRepository::new(repository.clone(), aside.clone())),
            projects: Arc::new(CachedProjectRepository::new(repository, aside.clone())),
            views: ViewTracker::new(cache.clone(), config.view_dedup_window()),
            auth: AdminAuth::new(
                cache.clone(),
                config.admin_credentials(),
                config.login_policy(),
                config.session_ttl(),
            ),
            dashboard_stats_ttl: config.dashboard_stats_ttl(),
            trust_proxy_headers: config.trust_proxy_headers,
            aside,
            cache,
        }
    }
}
