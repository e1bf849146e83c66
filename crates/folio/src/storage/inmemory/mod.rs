//! In-memory source of truth.
//!
//! Stores posts and projects in HashMaps wrapped in `Arc<RwLock<_>>`. Used
//! as the backing store of the service and in tests.

mod repository;

pub use repository::InMemoryRepository;
