use super::error::ContentError;
use super::types::{BlogPost, Project};

const MAX_TITLE_LEN: usize = 200;

/// Derives a URL slug from a title.
///
/// Letters and digits are lowercased and kept; every other run of
/// characters becomes a single `-`.
///
/// # Examples
///
/// ```
/// use folio_core::content::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Rust & Redis  "), "rust-redis");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

fn validate_title(title: &str) -> Result<(), ContentError> {
    if title.trim().is_empty() {
        return Err(ContentError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ContentError::TitleTooLong);
    }
    if slugify(title).is_empty() {
        return Err(ContentError::EmptySlug);
    }
    Ok(())
}

/// Validates a blog post before creation or update.
pub fn validate_post(post: &BlogPost) -> Result<(), ContentError> {
    validate_title(&post.title)?;
    if post.content.trim().is_empty() {
        return Err(ContentError::EmptyContent);
    }
    Ok(())
}

/// Validates a project before creation or update.
pub fn validate_project(project: &Project) -> Result<(), ContentError> {
    validate_title(&project.title)?;
    if project.description.trim().is_empty() {
        return Err(ContentError::EmptyContent);
    }
    Ok(())
}

/// Returns the non-archived posts, newest first.
pub fn published_posts(posts: &[BlogPost]) -> Vec<BlogPost> {
    let mut published: Vec<BlogPost> = posts.iter().filter(|p| !p.archived).cloned().collect();
    published.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    published
}

/// Returns projects with featured ones first, then newest first.
pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("My Post"), "my-post");
        assert_eq!(slugify("my-post"), "my-post");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("a -- b __ c"), "a-b-c");
        assert_eq!(slugify("--lead and trail--"), "lead-and-trail");
    }

    #[test]
    fn test_slugify_unicode_letters() {
        assert_eq!(slugify("Café Crème"), "café-crème");
    }

    #[test]
    fn test_slugify_no_alphanumerics() {
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn test_validate_post() {
        assert!(validate_post(&BlogPost::new("Title", "Body")).is_ok());
        assert_eq!(
            validate_post(&BlogPost::new("   ", "Body")),
            Err(ContentError::EmptyTitle)
        );
        assert_eq!(
            validate_post(&BlogPost::new("!!!", "Body")),
            Err(ContentError::EmptySlug)
        );
        assert_eq!(
            validate_post(&BlogPost::new("Title", " ")),
            Err(ContentError::EmptyContent)
        );
        assert_eq!(
            validate_post(&BlogPost::new("x".repeat(201), "Body")),
            Err(ContentError::TitleTooLong)
        );
    }

    #[test]
    fn test_validate_project() {
        assert!(validate_project(&Project::new("Folio", "CMS")).is_ok());
        assert_eq!(
            validate_project(&Project::new("Folio", "")),
            Err(ContentError::EmptyContent)
        );
    }

    #[test]
    fn test_published_posts_excludes_archived_and_sorts() {
        let old = BlogPost::new("Old", "b")
            .with_published_at(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        let new = BlogPost::new("New", "b")
            .with_published_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let gone = BlogPost::new("Gone", "b").archived();

        let published = published_posts(&[old, gone, new]);
        let slugs: Vec<&str> = published.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old"]);
    }

    #[test]
    fn test_sort_projects_featured_first() {
        let older = Project::new("Older", "d")
            .with_created_at(Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap());
        let newer = Project::new("Newer", "d")
            .with_created_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let star = Project::new("Star", "d")
            .featured()
            .with_created_at(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());

        let mut projects = vec![older, newer, star];
        sort_projects(&mut projects);
        let slugs: Vec<&str> = projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["star", "newer", "older"]);
    }
}
