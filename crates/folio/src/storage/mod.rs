//! Storage implementations.
//!
//! The in-memory repository is the source of truth; the cached decorators put
//! the cache-aside layer in front of it.

pub mod cached;
pub mod inmemory;

pub use cached::{CachedBlogRepository, CachedProjectRepository};
pub use inmemory::InMemoryRepository;
