//! Remote connection bookkeeping for the cache client.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use folio_core::cache::{Cache, Result};

/// Opens connections to the remote cache.
///
/// The Redis backend implements this for production; tests substitute
/// connectors that fail or hand out in-process stores.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establishes a new remote connection.
    async fn connect(&self) -> Result<Arc<dyn Cache>>;

    /// Human-readable address used in logs.
    fn address(&self) -> &str;
}

/// Lifecycle of the remote connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Ready,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Ready => "ready",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection state owned by a single cache client.
///
/// `remote` is only set while `status` is `Ready`. At most one connect
/// cycle exists at a time, tracked by `pending_reconnect`.
pub(crate) struct ConnectionState {
    pub status: ConnectionStatus,
    pub remote: Option<Arc<dyn Cache>>,
    pub reconnect_attempts: u32,
    pub pending_reconnect: Option<JoinHandle<()>>,
    pub shut_down: bool,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            remote: None,
            reconnect_attempts: 0,
            pending_reconnect: None,
            shut_down: false,
        }
    }

    /// Moves to `Ready` with a fresh connection and resets the attempt counter.
    pub fn mark_ready(&mut self, remote: Arc<dyn Cache>) {
        self.status = ConnectionStatus::Ready;
        self.remote = Some(remote);
        self.reconnect_attempts = 0;
    }

    /// Drops the remote connection if `failed` is still the current one.
    ///
    /// Returns false for errors raised by a connection that was already
    /// replaced or dropped, so each loss is handled once.
    pub fn drop_remote(&mut self, failed: &Arc<dyn Cache>) -> bool {
        let current = self
            .remote
            .as_ref()
            .is_some_and(|remote| Arc::ptr_eq(remote, failed));
        if !current {
            return false;
        }
        self.status = ConnectionStatus::Disconnected;
        self.remote = None;
        true
    }

    /// Aborts the pending connect cycle, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_reconnect.take() {
            handle.abort();
        }
    }
}
