//! Admin authentication.
//!
//! Sessions live in an in-process [`SessionStore`], so issued tokens keep
//! verifying while the remote cache is down. Failed-login counters, login
//! blocks and revoked tokens are cache entries with TTLs.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use folio_core::auth::{AuthError, LoginPolicy, Result};
use folio_core::cache::{denylist_key, login_attempts_key, login_block_key};

use crate::cache::CacheClient;

/// The single admin account.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

/// An issued admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredSession {
    session: Session,
    deadline: Instant,
}

/// In-process session storage with per-session expiry.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, StoredSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert(&self, session: Session, ttl: Duration) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, stored| stored.deadline > now);
        sessions.insert(
            session.token.clone(),
            StoredSession {
                session,
                deadline: now + ttl,
            },
        );
    }

    async fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .filter(|stored| stored.deadline > Instant::now())
            .map(|stored| stored.session.clone())
    }

    async fn remove(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token).is_some()
    }
}

#[derive(Clone)]
pub struct AdminAuth {
    client: CacheClient,
    sessions: SessionStore,
    credentials: Option<AdminCredentials>,
    policy: LoginPolicy,
    session_ttl: Duration,
}

impl AdminAuth {
    /// Creates the authenticator. Without credentials every login is refused.
    pub fn new(
        client: CacheClient,
        credentials: Option<AdminCredentials>,
        policy: LoginPolicy,
        session_ttl: Duration,
    ) -> Self {
        Self {
            client,
            sessions: SessionStore::new(),
            credentials,
            policy,
            session_ttl,
        }
    }

    /// Checks credentials for `client_id` and issues a session.
    ///
    /// Failures are counted per client inside the attempt window; reaching
    /// the limit blocks the client for the block duration.
    pub async fn login(&self, client_id: &str, username: &str, password: &str) -> Result<Session> {
        let Some(credentials) = &self.credentials else {
            return Err(AuthError::LoginDisabled);
        };

        if self.client.exists(&login_block_key(client_id)).await {
            return Err(self.blocked());
        }

        let attempts_key = login_attempts_key(client_id);
        if credentials.username == username && credentials.password == password {
            self.client.delete(&attempts_key).await;
            return Ok(self.issue_session(username).await);
        }

        let failures = self.client.increment(&attempts_key).await;
        if failures == 1 {
            self.client
                .expire(&attempts_key, self.policy.attempt_window)
                .await;
        }

        if self.policy.should_block(failures) {
            self.client
                .set(
                    &login_block_key(client_id),
                    "blocked",
                    Some(self.policy.block_duration),
                )
                .await;
            self.client.delete(&attempts_key).await;
            tracing::warn!(client = client_id, failures, "Login blocked after repeated failures");
            return Err(self.blocked());
        }

        tracing::debug!(client = client_id, failures, "Failed login attempt");
        Err(AuthError::InvalidCredentials)
    }

    /// Returns the session of a valid, non-revoked token.
    pub async fn verify(&self, token: &str) -> Result<Session> {
        let session = self
            .sessions
            .get(token)
            .await
            .ok_or(AuthError::Unauthorized)?;
        if self.client.exists(&denylist_key(token)).await {
            return Err(AuthError::Unauthorized);
        }
        Ok(session)
    }

    /// Revokes a token.
    ///
    /// The session is dropped from the store, which is enough on its own;
    /// the denylist entry outlives any session the token could belong to.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.verify(token).await?;
        self.sessions.remove(token).await;
        self.client
            .set(&denylist_key(token), "revoked", Some(self.session_ttl))
            .await;
        tracing::info!("Admin logged out");
        Ok(())
    }

    async fn issue_session(&self, username: &str) -> Session {
        let issued_at = Utc::now();
        let expires_at = chrono::Duration::from_std(self.session_ttl)
            .map(|ttl| issued_at + ttl)
            .unwrap_or(issued_at);
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            username: username.to_string(),
            issued_at,
            expires_at,
        };
        self.sessions
            .insert(session.clone(), self.session_ttl)
            .await;
        session
    }

    fn blocked(&self) -> AuthError {
        AuthError::Blocked {
            retry_after_secs: self.policy.block_duration.as_secs(),
        }
    }
}
