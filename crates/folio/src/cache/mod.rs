//! Cache runtime.
//!
//! The byte-level [`Cache`](folio_core::cache::Cache) trait has two
//! implementations here: the remote Redis backend and the in-process
//! fallback store. [`CacheClient`] switches between them at runtime, and the
//! aside and invalidation helpers build the content caching on top of it.

mod aside;
mod client;
mod connection;
mod fallback;
mod invalidation;
pub mod redis_impl;

#[cfg(test)]
pub(crate) mod testing;

pub use aside::{get_or_compute, CacheAside};
pub use client::CacheClient;
pub use connection::{ConnectionStatus, Connector};
pub use fallback::FallbackStore;
pub use invalidation::{blog_invalidation_keys, invalidate, project_invalidation_keys};
pub use redis_impl::RedisConnector;
