use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Byte-level key/value cache operations.
///
/// Implemented by the remote Redis backend and by the in-process fallback
/// store, so both expose the same observable semantics.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key. Returns true if a value was removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Deletes all values matching a glob pattern (e.g., "views:blog:*").
    ///
    /// Returns the number of removed keys.
    async fn delete_pattern(&self, pattern: &str) -> Result<u64>;

    /// Returns true if a live value exists for the key.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Sets a TTL on an existing key. Returns false if the key does not exist.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// Increments the integer stored at key by one, starting from zero.
    async fn increment(&self, key: &str) -> Result<i64>;

    /// Removes every key.
    async fn flush_all(&self) -> Result<()>;
}
