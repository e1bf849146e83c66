//! In-process fallback store.
//!
//! Stands in for Redis while the remote cache is unreachable and exposes the
//! same observable semantics through the [`Cache`] trait:
//! - TTLs are enforced lazily; an expired entry is removed when it is next touched
//! - `increment` starts from zero and keeps the entry's existing expiry, like `INCR`
//! - memory is bounded by LRU eviction
//!
//! Every operation takes the single store lock once, so read-modify-write
//! steps such as `increment` are atomic across tasks.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;
use tokio::time::Instant;

use folio_core::cache::{parse_counter, pattern_matches, store_ttl, Cache, Result};

/// A stored value with optional expiration.
#[derive(Debug, Clone)]
struct FallbackEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl FallbackEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|d| Instant::now() + store_ttl(d)),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// Process-local key/value store with per-key expiry.
#[derive(Debug, Clone)]
pub struct FallbackStore {
    store: Arc<Mutex<LruCache<String, FallbackEntry>>>,
}

impl FallbackStore {
    /// Creates a store holding at most `max_entries` keys (at least one).
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Number of entries currently held, including not yet collected expired ones.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

/// Looks up a live entry, removing it if it has expired.
fn live_entry<'a>(
    store: &'a mut LruCache<String, FallbackEntry>,
    key: &str,
    now: Instant,
) -> Option<&'a mut FallbackEntry> {
    if store.peek(key).is_some_and(|entry| entry.is_expired(now)) {
        store.pop(key);
        return None;
    }
    store.get_mut(key)
}

#[async_trait]
impl Cache for FallbackStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.lock().await;
        Ok(live_entry(&mut store, key, Instant::now()).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.lock().await;
        store.put(key.to_string(), FallbackEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut store = self.store.lock().await;
        let now = Instant::now();
        Ok(store.pop(key).is_some_and(|entry| !entry.is_expired(now)))
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        let mut store = self.store.lock().await;
        let keys: Vec<String> = store
            .iter()
            .filter(|(key, _)| pattern_matches(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();

        let now = Instant::now();
        let mut removed = 0;
        for key in keys {
            if store.pop(&key).is_some_and(|entry| !entry.is_expired(now)) {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut store = self.store.lock().await;
        Ok(live_entry(&mut store, key, Instant::now()).is_some())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let mut store = self.store.lock().await;
        let now = Instant::now();
        match live_entry(&mut store, key, now) {
            Some(entry) => {
                entry.expires_at = Some(now + store_ttl(ttl));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        let mut store = self.store.lock().await;
        let now = Instant::now();

        let (current, expires_at) = match live_entry(&mut store, key, now) {
            Some(entry) => (parse_counter(Some(&entry.value))?, entry.expires_at),
            None => (0, None),
        };

        let next = current + 1;
        store.put(
            key.to_string(),
            FallbackEntry {
                value: next.to_string().into_bytes(),
                expires_at,
            },
        );
        Ok(next)
    }

    async fn flush_all(&self) -> Result<()> {
        self.store.lock().await.clear();
        Ok(())
    }
}
