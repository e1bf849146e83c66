//! Redis cache implementation.
//!
//! Connections are plain multiplexed connections without automatic
//! reconnection: the cache client owns the reconnect cycle, so a dropped
//! connection surfaces here as `CacheError::ConnectionFailed`.
//!
//! ## Key tracking
//!
//! Every view key is added to its item's tracking set
//! (`views:<kind>:<slug>:keys`) when written. Deleting an item's view keys
//! reads that set instead of scanning the keyspace. Patterns outside the view
//! namespace fall back to cursor-based `SCAN`, never `KEYS`.
//!
//! The write and the `SADD` are separate commands. A key written between a
//! `SMEMBERS` and the `DEL` that follows survives the delete; view counters
//! tolerate that.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionLike, MultiplexedConnection};
use redis::AsyncCommands;

use folio_core::cache::{pattern_matches, store_ttl, view_tracking_key_for, Cache, Result};

use super::error::map_redis_error;
use crate::cache::connection::Connector;

/// Redis cache backend over one multiplexed connection.
#[derive(Clone)]
pub struct RedisCache {
    conn: MultiplexedConnection,
}

impl RedisCache {
    /// Opens a connection with the given client.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the server is unreachable.
    pub async fn connect(client: &redis::Client) -> Result<Self> {
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }

    /// Adds a view key to its item's tracking set.
    async fn track(&self, conn: &mut MultiplexedConnection, key: &str) -> Result<()> {
        match view_tracking_key_for(key) {
            Some(tracking_key) if tracking_key != key => conn
                .sadd::<_, _, ()>(&tracking_key, key)
                .await
                .map_err(map_redis_error),
            _ => Ok(()),
        }
    }

    /// Collects keys matching `pattern` with `SCAN`, in batches.
    async fn scan_keys(
        &self,
        conn: &mut MultiplexedConnection,
        pattern: &str,
    ) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut *conn)
                .await
                .map_err(map_redis_error)?;
            keys.extend(batch);
            if next == 0 {
                return Ok(keys);
            }
            cursor = next;
        }
    }
}

const SCAN_BATCH: usize = 500;

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(map_redis_error)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();
        match ttl {
            Some(duration) => {
                conn.set_ex::<_, _, ()>(key, value, store_ttl(duration).as_secs())
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }
        self.track(&mut conn, key).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(key).await.map_err(map_redis_error)?;
        Ok(removed > 0)
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        let mut conn = self.conn.clone();

        let Some(tracking_key) = view_tracking_key_for(pattern) else {
            let keys = self.scan_keys(&mut conn, pattern).await?;
            if keys.is_empty() {
                return Ok(0);
            }
            return conn.del(&keys).await.map_err(map_redis_error);
        };

        let tracked: Vec<String> = conn
            .smembers(&tracking_key)
            .await
            .map_err(map_redis_error)?;
        let keys: Vec<String> = tracked
            .into_iter()
            .filter(|key| pattern_matches(pattern, key))
            .collect();

        let removed: u64 = if keys.is_empty() {
            0
        } else {
            conn.del(&keys).await.map_err(map_redis_error)?
        };

        // Members of expired keys are dropped along with live ones
        if pattern_matches(pattern, &tracking_key) {
            conn.del::<_, ()>(&tracking_key)
                .await
                .map_err(map_redis_error)?;
        } else if !keys.is_empty() {
            conn.srem::<_, _, ()>(&tracking_key, &keys)
                .await
                .map_err(map_redis_error)?;
        }
        Ok(removed)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        conn.exists(key).await.map_err(map_redis_error)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.conn.clone();
        let seconds = store_ttl(ttl).as_secs() as i64;
        conn.expire(key, seconds).await.map_err(map_redis_error)
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.incr(key, 1).await.map_err(map_redis_error)?;
        if value == 1 {
            self.track(&mut conn, key).await?;
        }
        Ok(value)
    }

    async fn flush_all(&self) -> Result<()> {
        // Scoped to the configured logical database
        let mut conn = self.conn.clone();
        conn.req_packed_command(&redis::cmd("FLUSHDB"))
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}

/// Opens Redis connections for the cache client.
pub struct RedisConnector {
    client: redis::Client,
    address: String,
}

impl RedisConnector {
    /// Creates a connector for a Redis URL.
    ///
    /// No connection is attempted until [`Connector::connect`] is called.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::OperationFailed` if the URL is invalid.
    pub fn new(url: &str, address: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        Ok(Self {
            client,
            address: address.into(),
        })
    }
}

#[async_trait]
impl Connector for RedisConnector {
    async fn connect(&self) -> Result<Arc<dyn Cache>> {
        let cache = RedisCache::connect(&self.client).await?;
        Ok(Arc::new(cache))
    }

    fn address(&self) -> &str {
        &self.address
    }
}
