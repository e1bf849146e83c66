use crate::content::ContentKind;

/// Cache key for the published blog listing.
pub const BLOG_LIST_KEY: &str = "blogs";

/// Cache key for the blog archive aggregate.
pub const BLOG_ARCHIVE_KEY: &str = "blogArchive";

/// Cache key for the project listing.
pub const PROJECT_LIST_KEY: &str = "projects";

/// Cache key for the admin dashboard statistics aggregate.
pub const DASHBOARD_STATS_KEY: &str = "dashboard:stats";

/// Returns the cache key for a single blog post.
pub fn blog_key(slug: &str) -> String {
    format!("blog:{}", slug)
}

/// Returns the cache key for a single project.
pub fn project_key(slug: &str) -> String {
    format!("project:{}", slug)
}

/// Returns the cache key for the dashboard statistics.
pub fn dashboard_stats_key() -> &'static str {
    DASHBOARD_STATS_KEY
}

/// Returns the counter key holding the total views of an item.
pub fn view_total_key(kind: ContentKind, slug: &str) -> String {
    format!("views:{}:{}:total", kind.as_str(), slug)
}

/// Returns the marker key used to deduplicate views from one visitor.
pub fn view_visitor_key(kind: ContentKind, slug: &str, visitor: &str) -> String {
    format!("views:{}:{}:visitor:{}", kind.as_str(), slug, visitor)
}

/// Returns the pattern matching every view key of an item.
pub fn views_pattern(kind: ContentKind, slug: &str) -> String {
    format!("views:{}:{}:*", kind.as_str(), slug)
}

/// Returns the set that tracks every view key of one item.
///
/// Lets a backend delete an item's view keys without scanning the keyspace.
pub fn view_tracking_key(kind: ContentKind, slug: &str) -> String {
    format!("views:{}:{}:keys", kind.as_str(), slug)
}

/// Returns the tracking set owning a view key, or every key matched by a
/// view key pattern.
///
/// `None` for keys outside the view namespace and for patterns whose kind
/// or slug segment is a wildcard.
pub fn view_tracking_key_for(key: &str) -> Option<String> {
    let mut segments = key.strip_prefix("views:")?.splitn(3, ':');
    let kind = segments.next()?;
    let slug = segments.next()?;
    segments.next()?;

    let concrete = |s: &str| !s.is_empty() && !s.contains('*');
    if !concrete(kind) || !concrete(slug) {
        return None;
    }
    Some(format!("views:{kind}:{slug}:keys"))
}

/// Returns the counter key for failed login attempts of a client.
pub fn login_attempts_key(client: &str) -> String {
    format!("login_attempts:{}", client)
}

/// Returns the marker key set while a client is blocked from logging in.
pub fn login_block_key(client: &str) -> String {
    format!("login_block:{}", client)
}

/// Returns the denylist key of a revoked token.
pub fn denylist_key(token: &str) -> String {
    format!("denylist:{}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_key() {
        assert_eq!(blog_key("my-post"), "blog:my-post");
    }

    #[test]
    fn test_project_key() {
        assert_eq!(project_key("folio"), "project:folio");
    }

    #[test]
    fn test_view_keys() {
        assert_eq!(view_total_key(ContentKind::Blog, "x"), "views:blog:x:total");
        assert_eq!(
            view_visitor_key(ContentKind::Project, "x", "10.0.0.1"),
            "views:project:x:visitor:10.0.0.1"
        );
        assert_eq!(views_pattern(ContentKind::Blog, "x"), "views:blog:x:*");
    }

    #[test]
    fn test_view_tracking_key_for() {
        let tracking = view_tracking_key(ContentKind::Blog, "x");
        assert_eq!(tracking, "views:blog:x:keys");

        assert_eq!(
            view_tracking_key_for(&view_total_key(ContentKind::Blog, "x")),
            Some(tracking.clone())
        );
        // IPv6 visitors carry colons of their own
        assert_eq!(
            view_tracking_key_for(&view_visitor_key(ContentKind::Blog, "x", "2001:db8::1")),
            Some(tracking.clone())
        );
        assert_eq!(
            view_tracking_key_for(&views_pattern(ContentKind::Blog, "x")),
            Some(tracking)
        );

        assert_eq!(view_tracking_key_for("views:blog:*:total"), None);
        assert_eq!(view_tracking_key_for("views:blog:x"), None);
        assert_eq!(view_tracking_key_for("blog:x"), None);
    }

    #[test]
    fn test_auth_keys() {
        assert_eq!(login_attempts_key("1.2.3.4"), "login_attempts:1.2.3.4");
        assert_eq!(login_block_key("1.2.3.4"), "login_block:1.2.3.4");
        assert_eq!(denylist_key("abc"), "denylist:abc");
    }

    #[test]
    fn test_aggregate_keys_are_distinct() {
        let keys = [
            BLOG_LIST_KEY,
            BLOG_ARCHIVE_KEY,
            PROJECT_LIST_KEY,
            dashboard_stats_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_views_pattern_matches_item_keys_only() {
        use crate::cache::pattern_matches;

        let pattern = views_pattern(ContentKind::Blog, "x");
        assert!(pattern_matches(
            &pattern,
            &view_total_key(ContentKind::Blog, "x")
        ));
        assert!(pattern_matches(
            &pattern,
            &view_visitor_key(ContentKind::Blog, "x", "v")
        ));
        assert!(!pattern_matches(
            &pattern,
            &view_total_key(ContentKind::Blog, "xy")
        ));
        assert!(!pattern_matches(
            &pattern,
            &view_total_key(ContentKind::Project, "x")
        ));
    }
}
