//! Blog archive aggregation.
//!
//! The archive groups archived posts by publication month, newest month
//! first. It is the aggregate cached under `blogArchive`.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::types::BlogPost;

/// A post as listed in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveItem {
    pub title: String,
    pub slug: String,
    pub published_at: DateTime<Utc>,
}

/// All archived posts published in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveMonth {
    pub year: i32,
    pub month: u32,
    pub posts: Vec<ArchiveItem>,
}

/// Builds the archive aggregate from a set of posts.
///
/// Non-archived posts are ignored. Months and the posts inside each month
/// are ordered newest first.
pub fn build_archive(posts: &[BlogPost]) -> Vec<ArchiveMonth> {
    let mut archived: Vec<&BlogPost> = posts.iter().filter(|p| p.archived).collect();
    archived.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let mut months: Vec<ArchiveMonth> = Vec::new();
    for post in archived {
        let (year, month) = (post.published_at.year(), post.published_at.month());
        let item = ArchiveItem {
            title: post.title.clone(),
            slug: post.slug.clone(),
            published_at: post.published_at,
        };

        match months.last_mut() {
            Some(last) if last.year == year && last.month == month => last.posts.push(item),
            _ => months.push(ArchiveMonth {
                year,
                month,
                posts: vec![item],
            }),
        }
    }

    months
}
