//! Test doubles for the cache layer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use folio_core::cache::{Cache, CacheError, ReconnectPolicy, Result};

use super::connection::{ConnectionStatus, Connector};
use super::{CacheClient, FallbackStore};

/// Connector that fails a configurable number of times, then hands out `remote`.
pub struct ScriptedConnector {
    calls: AtomicUsize,
    failures_left: AtomicUsize,
    remote: Arc<dyn Cache>,
}

impl ScriptedConnector {
    pub fn new(failures: usize, remote: Arc<dyn Cache>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures_left: AtomicUsize::new(failures),
            remote,
        }
    }

    /// A connector whose remote is never reachable.
    pub fn unreachable() -> Self {
        Self::new(usize::MAX, Arc::new(FallbackStore::new(1)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failures(&self, failures: usize) {
        self.failures_left.store(failures, Ordering::SeqCst);
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn connect(&self) -> Result<Arc<dyn Cache>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                0 => None,
                usize::MAX => Some(usize::MAX),
                n => Some(n - 1),
            })
            .is_ok();
        if failing {
            return Err(CacheError::ConnectionFailed("connection refused".into()));
        }
        Ok(Arc::clone(&self.remote))
    }

    fn address(&self) -> &str {
        "scripted:6379"
    }
}

/// How a [`FaultyCache`] answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    ConnectionLost,
    OperationFails,
}

/// Remote stand-in backed by a fallback store that can be made to fail.
pub struct FaultyCache {
    store: FallbackStore,
    fault: Mutex<Fault>,
}

impl FaultyCache {
    pub fn new() -> Self {
        Self {
            store: FallbackStore::new(1000),
            fault: Mutex::new(Fault::None),
        }
    }

    pub fn store(&self) -> &FallbackStore {
        &self.store
    }

    pub fn set_fault(&self, fault: Fault) {
        *self.fault.lock().unwrap() = fault;
    }

    fn check(&self) -> Result<()> {
        match *self.fault.lock().unwrap() {
            Fault::None => Ok(()),
            Fault::ConnectionLost => Err(CacheError::ConnectionFailed("connection reset".into())),
            Fault::OperationFails => Err(CacheError::OperationFailed("WRONGTYPE".into())),
        }
    }
}

#[async_trait]
impl Cache for FaultyCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check()?;
        self.store.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        self.check()?;
        self.store.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.check()?;
        self.store.delete(key).await
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        self.check()?;
        self.store.delete_pattern(pattern).await
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.check()?;
        self.store.exists(key).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        self.check()?;
        self.store.expire(key, ttl).await
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        self.check()?;
        self.store.increment(key).await
    }

    async fn flush_all(&self) -> Result<()> {
        self.check()?;
        self.store.flush_all().await
    }
}

/// Waits (up to ten seconds of tokio time) for the client to reach `status`.
pub async fn wait_for_status(client: &CacheClient, status: ConnectionStatus) {
    for _ in 0..1000 {
        if client.status() == status {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("cache client never reached {status}");
}

/// A client connected to an in-process remote.
pub async fn connected_client() -> (CacheClient, Arc<FaultyCache>) {
    let remote = Arc::new(FaultyCache::new());
    let connector = Arc::new(ScriptedConnector::new(0, remote.clone()));
    let client = CacheClient::new(
        connector,
        FallbackStore::new(1000),
        ReconnectPolicy::default(),
    );
    wait_for_status(&client, ConnectionStatus::Ready).await;
    (client, remote)
}

/// A client whose remote is unreachable and never retried.
pub fn disconnected_client() -> CacheClient {
    let policy = ReconnectPolicy {
        max_attempts: 0,
        ..ReconnectPolicy::default()
    };
    CacheClient::new(
        Arc::new(ScriptedConnector::unreachable()),
        FallbackStore::new(1000),
        policy,
    )
}
