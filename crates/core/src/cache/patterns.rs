//! Glob matching for cache key patterns.
//!
//! Only `*` is special: it matches any run of characters, including none.
//! This is the subset of Redis `KEYS`/`SCAN` glob syntax the server uses.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use folio_core::cache::pattern_matches;
///
/// assert!(pattern_matches("blog:my-post", "blog:my-post"));
/// assert!(pattern_matches("views:blog:my-post:*", "views:blog:my-post:total"));
/// assert!(pattern_matches("views:*:total", "views:project:folio:total"));
/// assert!(!pattern_matches("views:blog:*", "blog:my-post"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    if pattern.is_empty() {
        return key.is_empty();
    }

    let segments: Vec<&str> = pattern.split('*').collect();
    if segments.len() == 1 {
        return pattern == key;
    }

    let last = segments.len() - 1;
    let mut remaining = key;

    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            continue;
        }

        if i == 0 {
            // Anchored at the start
            match remaining.strip_prefix(segment) {
                Some(rest) => remaining = rest,
                None => return false,
            }
        } else if i == last {
            // Anchored at the end
            return remaining.ends_with(segment);
        } else {
            match remaining.find(segment) {
                Some(pos) => remaining = &remaining[pos + segment.len()..],
                None => return false,
            }
        }
    }

    true
}
