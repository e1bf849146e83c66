//! View analytics types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary shown on the admin dashboard.
///
/// Cached as an aggregate under `dashboard:stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub published_posts: u64,
    pub archived_posts: u64,
    pub projects: u64,
    pub generated_at: DateTime<Utc>,
}

impl DashboardStats {
    /// Total number of blog posts, archived or not.
    pub fn total_posts(&self) -> u64 {
        self.published_posts + self.archived_posts
    }
}

/// View counter of a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCount {
    pub slug: String,
    pub views: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_posts() {
        let stats = DashboardStats {
            published_posts: 3,
            archived_posts: 2,
            projects: 1,
            generated_at: Utc::now(),
        };
        assert_eq!(stats.total_posts(), 5);
    }
}
