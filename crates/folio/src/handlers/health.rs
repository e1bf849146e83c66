//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Cache connectivity (passive, never touches the remote)

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CacheHealth {
    pub status: &'static str,
    pub connected: bool,
    pub reconnect_attempts: u32,
    pub reconnect_pending: bool,
}

#[derive(Debug, Serialize)]
pub struct Health {
    /// `ok` when the remote cache is connected, `degraded` while serving from
    /// the fallback store.
    pub status: &'static str,
    pub cache: CacheHealth,
}

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Cache connection state.
///
/// Always 200: the service keeps answering on the fallback store, so a
/// disconnected cache is reported as `degraded` rather than unhealthy.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Json<Health> {
    let connected = state.cache.is_connected();

    Json(Health {
        status: if connected { "ok" } else { "degraded" },
        cache: CacheHealth {
            status: state.cache.status().as_str(),
            connected,
            reconnect_attempts: state.cache.reconnect_attempts(),
            reconnect_pending: state.cache.reconnect_pending(),
        },
    })
}
