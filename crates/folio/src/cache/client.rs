//! Fault-tolerant cache client.
//!
//! [`CacheClient`] is the single handle through which the application reads
//! and writes cached state. Every operation tries the remote cache and
//! degrades to the in-process [`FallbackStore`] when the remote is missing or
//! fails, so no operation ever returns an error to the caller.
//!
//! The remote connection is supervised by a background connect cycle:
//! - construction starts the first attempt without blocking
//! - a failed attempt is retried with bounded linear backoff
//! - once the attempt budget is spent the client stays on the fallback store
//!   until [`CacheClient::reconnect`] is called
//! - a connection lost during an operation schedules one delayed retry

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::Serialize;
use serde_json::Value;

use folio_core::cache::{decode_value, encode_value, Cache, CacheError, ReconnectPolicy, Result};

use super::connection::{ConnectionState, ConnectionStatus, Connector};
use super::FallbackStore;

/// Shared handle to the cache. Cloning is cheap and shares connection state.
#[derive(Clone)]
pub struct CacheClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    connector: Arc<dyn Connector>,
    fallback: FallbackStore,
    policy: ReconnectPolicy,
    state: Mutex<ConnectionState>,
}

impl ClientInner {
    fn state(&self) -> MutexGuard<'_, ConnectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remote(&self) -> Option<Arc<dyn Cache>> {
        let state = self.state();
        match state.status {
            ConnectionStatus::Ready => state.remote.clone(),
            _ => None,
        }
    }

    /// Spawns a connect cycle after `delay` unless one is pending or the
    /// connection is already up.
    fn schedule_connect(self: &Arc<Self>, delay: Duration) -> bool {
        let mut state = self.state();
        if state.shut_down
            || state.pending_reconnect.is_some()
            || state.status == ConnectionStatus::Ready
        {
            return false;
        }

        let inner = Arc::clone(self);
        state.pending_reconnect = Some(tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            inner.connect_cycle().await;
        }));
        true
    }

    async fn connect_cycle(self: Arc<Self>) {
        let address = self.connector.address();

        loop {
            {
                let mut state = self.state();
                if state.shut_down {
                    state.pending_reconnect = None;
                    return;
                }
                state.status = ConnectionStatus::Connecting;
            }
            tracing::debug!(address, "Connecting to remote cache");

            let err = match self.connector.connect().await {
                Ok(remote) => {
                    {
                        let mut state = self.state();
                        state.pending_reconnect = None;
                        if state.shut_down {
                            state.status = ConnectionStatus::Disconnected;
                            return;
                        }
                        state.mark_ready(remote);
                    }
                    tracing::info!(address, "Remote cache ready");

                    // Entries written during the outage must not resurface
                    // during the next one.
                    if let Err(err) = self.fallback.flush_all().await {
                        tracing::warn!(error = %err, "Failed to clear fallback store");
                    }
                    return;
                }
                Err(err) => err,
            };

            let (attempts, delay) = {
                let mut state = self.state();
                state.status = ConnectionStatus::Disconnected;
                state.reconnect_attempts += 1;
                let attempts = state.reconnect_attempts;
                let delay = self.policy.next_delay(attempts);
                if delay.is_none() {
                    state.pending_reconnect = None;
                }
                (attempts, delay)
            };

            let Some(delay) = delay else {
                tracing::error!(
                    address,
                    attempts,
                    error = %err,
                    "Giving up on remote cache, serving from fallback store until reconnect"
                );
                return;
            };

            tracing::warn!(
                address,
                attempt = attempts,
                retry_in_ms = delay.as_millis() as u64,
                error = %err,
                "Remote cache connection failed"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Handles a connection-class error raised by `failed`.
    fn connection_lost(self: &Arc<Self>, failed: &Arc<dyn Cache>, err: &CacheError) {
        let mut state = self.state();
        if !state.drop_remote(failed) {
            return;
        }
        tracing::warn!(
            address = self.connector.address(),
            error = %err,
            "Remote cache connection lost, using fallback store"
        );

        if state.shut_down
            || state.pending_reconnect.is_some()
            || !self.policy.allows_close_retry(state.reconnect_attempts)
        {
            return;
        }
        drop(state);
        self.schedule_connect(self.policy.close_retry_delay);
    }
}

impl CacheClient {
    /// Creates a client and starts connecting in the background.
    ///
    /// Must be called inside a tokio runtime. Until the remote is ready every
    /// operation is served by `fallback`.
    pub fn new(
        connector: Arc<dyn Connector>,
        fallback: FallbackStore,
        policy: ReconnectPolicy,
    ) -> Self {
        let inner = Arc::new(ClientInner {
            connector,
            fallback,
            policy,
            state: Mutex::new(ConnectionState::new()),
        });
        inner.schedule_connect(Duration::ZERO);
        Self { inner }
    }

    /// Runs `call` against the remote cache, then against the fallback store
    /// if the remote is unavailable or fails.
    async fn with_fallback<T, F>(&self, op: &'static str, key: &str, call: F) -> T
    where
        T: Default,
        F: for<'c> Fn(&'c dyn Cache) -> BoxFuture<'c, Result<T>>,
    {
        if let Some(remote) = self.inner.remote() {
            match call(remote.as_ref()).await {
                Ok(value) => return value,
                Err(err) if err.is_connection_failure() => {
                    self.inner.connection_lost(&remote, &err);
                }
                Err(err) => {
                    tracing::warn!(op, key, error = %err, "Remote cache operation failed");
                }
            }
        }

        let fallback: &dyn Cache = &self.inner.fallback;
        match call(fallback).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(op, key, error = %err, "Fallback store operation failed");
                T::default()
            }
        }
    }

    /// Gets a value, decoding JSON payloads.
    ///
    /// Payloads that are not JSON are returned as a raw string.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let bytes = self.get_bytes(key).await?;
        match decode_value(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(key, error = %err, "Cached payload is not JSON, returning raw value");
                Some(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
            }
        }
    }

    /// Gets the stored bytes of a key.
    pub async fn get_bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.with_fallback("get", key, |cache| {
            let key = key.to_owned();
            async move { cache.get(&key).await }.boxed()
        })
        .await
    }

    /// Stores a value. Strings are stored verbatim, everything else as JSON.
    pub async fn set<V>(&self, key: &str, value: &V, ttl: Option<Duration>)
    where
        V: Serialize + Sync + ?Sized,
    {
        let encoded = serde_json::to_value(value)
            .map_err(|e| CacheError::Serialization(e.to_string()))
            .and_then(|value| encode_value(&value));
        match encoded {
            Ok(bytes) => self.set_bytes(key, bytes, ttl).await,
            Err(err) => {
                tracing::error!(key, error = %err, "Failed to serialize cache value");
            }
        }
    }

    /// Stores raw bytes.
    pub async fn set_bytes(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) {
        self.with_fallback("set", key, |cache| {
            let key = key.to_owned();
            let value = value.clone();
            async move { cache.set(&key, &value, ttl).await }.boxed()
        })
        .await
    }

    /// Deletes a key. Returns true if a value was removed.
    pub async fn delete(&self, key: &str) -> bool {
        self.with_fallback("delete", key, |cache| {
            let key = key.to_owned();
            async move { cache.delete(&key).await }.boxed()
        })
        .await
    }

    /// Deletes every key matching a glob pattern and returns how many were removed.
    pub async fn delete_pattern(&self, pattern: &str) -> u64 {
        self.with_fallback("delete_pattern", pattern, |cache| {
            let pattern = pattern.to_owned();
            async move { cache.delete_pattern(&pattern).await }.boxed()
        })
        .await
    }

    pub async fn exists(&self, key: &str) -> bool {
        self.with_fallback("exists", key, |cache| {
            let key = key.to_owned();
            async move { cache.exists(&key).await }.boxed()
        })
        .await
    }

    /// Sets a TTL on an existing key. Returns false if the key is missing.
    pub async fn expire(&self, key: &str, ttl: Duration) -> bool {
        self.with_fallback("expire", key, |cache| {
            let key = key.to_owned();
            async move { cache.expire(&key, ttl).await }.boxed()
        })
        .await
    }

    /// Increments a counter and returns the new value.
    ///
    /// Returns 0 if neither store could increment the key.
    pub async fn increment(&self, key: &str) -> i64 {
        self.with_fallback("increment", key, |cache| {
            let key = key.to_owned();
            async move { cache.increment(&key).await }.boxed()
        })
        .await
    }

    /// Removes every key of the active store.
    pub async fn flush_all(&self) {
        self.with_fallback("flush_all", "*", |cache| {
            async move { cache.flush_all().await }.boxed()
        })
        .await
    }

    /// Returns true while the remote cache is ready.
    pub fn is_connected(&self) -> bool {
        self.status() == ConnectionStatus::Ready
    }

    pub fn status(&self) -> ConnectionStatus {
        self.inner.state().status
    }

    /// Consecutive failed connection attempts since the last success.
    pub fn reconnect_attempts(&self) -> u32 {
        self.inner.state().reconnect_attempts
    }

    /// Returns true while a connect cycle is scheduled or running.
    pub fn reconnect_pending(&self) -> bool {
        self.inner.state().pending_reconnect.is_some()
    }

    /// Restarts the connect cycle with a fresh attempt budget.
    ///
    /// Does nothing while connected or after shutdown.
    pub fn reconnect(&self) {
        {
            let mut state = self.inner.state();
            if state.shut_down || state.status == ConnectionStatus::Ready {
                return;
            }
            state.cancel_pending();
            state.status = ConnectionStatus::Disconnected;
            state.reconnect_attempts = 0;
        }
        tracing::info!(
            address = self.inner.connector.address(),
            "Manual remote cache reconnect requested"
        );
        self.inner.schedule_connect(Duration::ZERO);
    }

    /// Closes the remote connection and stops reconnecting.
    ///
    /// Operations keep working against the fallback store.
    pub fn shutdown(&self) {
        let mut state = self.inner.state();
        if state.shut_down {
            return;
        }
        state.shut_down = true;
        state.cancel_pending();
        state.status = ConnectionStatus::Disconnected;
        state.remote = None;
        drop(state);
        tracing::info!("Cache client shut down");
    }
}
