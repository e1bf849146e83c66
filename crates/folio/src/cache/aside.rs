//! Read-through helper used by every cached content lookup.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use folio_core::cache::{is_empty_value, CacheTtl};

use super::CacheClient;

/// Returns the cached value of `key`, or computes, stores and returns it.
///
/// - the cache is only consulted while the remote is connected
/// - a hit (that decodes as `T`) returns without calling `compute`
/// - errors from `compute` are returned unchanged and nothing is cached
/// - the computed value is written back only while connected and only if it
///   is not empty (`null`, `""`, `[]`, `{}`)
///
/// Concurrent misses on the same key may each call `compute`; the last write
/// wins.
pub async fn get_or_compute<T, E, F, Fut>(
    client: &CacheClient,
    key: &str,
    ttl: Duration,
    compute: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if client.is_connected() {
        if let Some(cached) = client.get(key).await {
            match serde_json::from_value::<T>(cached) {
                Ok(value) => {
                    tracing::trace!(key, "Cache hit");
                    return Ok(value);
                }
                Err(err) => {
                    tracing::warn!(key, error = %err, "Cached value has unexpected shape, recomputing");
                }
            }
        }
    }

    tracing::trace!(key, "Cache miss");
    let value = compute().await?;

    if client.is_connected() {
        match serde_json::to_value(&value) {
            Ok(json) if is_empty_value(&json) => {
                tracing::trace!(key, "Computed value is empty, not caching");
            }
            Ok(json) => client.set(key, &json, Some(ttl)).await,
            Err(err) => {
                tracing::warn!(key, error = %err, "Failed to serialize computed value");
            }
        }
    }

    Ok(value)
}

/// Cache client paired with the configured TTL classes.
#[derive(Clone)]
pub struct CacheAside {
    client: CacheClient,
    short_ttl: Duration,
    long_ttl: Duration,
}

impl CacheAside {
    pub fn new(client: CacheClient, short_ttl: Duration, long_ttl: Duration) -> Self {
        Self {
            client,
            short_ttl,
            long_ttl,
        }
    }

    pub fn client(&self) -> &CacheClient {
        &self.client
    }

    /// Resolves a TTL class against the configured durations.
    pub fn ttl(&self, class: CacheTtl) -> Duration {
        class.resolve(self.short_ttl, self.long_ttl)
    }

    /// [`get_or_compute`] with a TTL class.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        class: CacheTtl,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        get_or_compute(&self.client, key, self.ttl(class), compute).await
    }
}
