//! Cached repository decorators.
//!
//! This module provides decorator implementations that wrap repository traits
//! with caching behavior. The decorators implement the cache-aside pattern:
//!
//! - **Reads**: Check cache first, on miss fetch from repository and populate cache
//! - **Writes**: Persist to repository, then invalidate affected keys
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let repo = Arc::new(InMemoryRepository::new());
//! let aside = CacheAside::new(client, CacheTtl::SHORT, CacheTtl::LONG);
//!
//! let posts = CachedBlogRepository::new(repo.clone(), aside.clone());
//! let projects = CachedProjectRepository::new(repo, aside);
//! ```

mod blog;
mod project;

pub use blog::CachedBlogRepository;
pub use project::CachedProjectRepository;
