//! Cache invalidation after content mutations.
//!
//! Each mutation removes the item key of every slug it touched plus every
//! aggregate key whose contents may have changed. Aggregates are dropped
//! whole rather than patched.

use folio_core::cache::{
    blog_key, project_key, BLOG_ARCHIVE_KEY, BLOG_LIST_KEY, DASHBOARD_STATS_KEY,
    PROJECT_LIST_KEY,
};

use super::CacheClient;

/// Keys affected by a blog post mutation.
///
/// Pass `new_slug` when the mutation renamed the post.
pub fn blog_invalidation_keys(slug: &str, new_slug: Option<&str>) -> Vec<String> {
    let mut keys = item_keys(blog_key, slug, new_slug);
    keys.extend(
        [BLOG_LIST_KEY, BLOG_ARCHIVE_KEY, DASHBOARD_STATS_KEY]
            .into_iter()
            .map(String::from),
    );
    keys
}

/// Keys affected by a project mutation.
pub fn project_invalidation_keys(slug: &str, new_slug: Option<&str>) -> Vec<String> {
    let mut keys = item_keys(project_key, slug, new_slug);
    keys.extend(
        [PROJECT_LIST_KEY, DASHBOARD_STATS_KEY]
            .into_iter()
            .map(String::from),
    );
    keys
}

fn item_keys(key_fn: fn(&str) -> String, slug: &str, new_slug: Option<&str>) -> Vec<String> {
    let mut keys = vec![key_fn(slug)];
    if let Some(new_slug) = new_slug.filter(|new_slug| *new_slug != slug) {
        keys.push(key_fn(new_slug));
    }
    keys
}

/// Deletes `keys`, best effort.
///
/// Skipped while the remote cache is unreachable; the mutation that
/// triggered it has already succeeded. Returns the number of removed keys.
pub async fn invalidate(client: &CacheClient, keys: &[String]) -> u64 {
    if !client.is_connected() {
        tracing::debug!(?keys, "Remote cache unavailable, skipping invalidation");
        return 0;
    }

    let mut removed = 0;
    for key in keys {
        if client.delete(key).await {
            removed += 1;
        }
    }
    tracing::trace!(?keys, removed, "Invalidated cache keys");
    removed
}
