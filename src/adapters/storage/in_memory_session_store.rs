//! In-Memory Session Store Adapter
//!
//! Holds intake sessions in a process-local map. Sessions are gone when the
//! process exits, and with a TTL configured they are also dropped once idle
//! for longer than the TTL.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for intake sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, IntakeSession>>>,
    /// Idle time after which a session expires; `None` keeps sessions forever.
    ttl: Option<Duration>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: None,
        }
    }

    /// Expire sessions idle for longer than `ttl`
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Remove every expired session, returning how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !is_expired(session, ttl, &now));
        before - sessions.len()
    }

    /// Purge expired sessions every `every` until the task is dropped
    pub async fn run_sweeper(self, every: Duration) {
        let mut interval = time::interval(every);
        loop {
            interval.tick().await;
            let purged = self.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "expired intake sessions removed");
            }
        }
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    fn expired(&self, session: &IntakeSession) -> bool {
        self.ttl
            .map(|ttl| is_expired(session, ttl, &Timestamp::now()))
            .unwrap_or(false)
    }
}

fn is_expired(session: &IntakeSession, ttl: Duration, now: &Timestamp) -> bool {
    // A negative age (clock skew) is never expired
    now.duration_since(session.updated_at())
        .to_std()
        .map(|idle| idle > ttl)
        .unwrap_or(false)
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, session: &IntakeSession) -> Result<(), SessionStoreError> {
        self.purge_expired().await;
        let mut sessions = self.sessions.write().await;
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<IntakeSession>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(id)
            .filter(|session| !self.expired(session))
            .cloned())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(id)
            .map(|_| ())
            .ok_or(SessionStoreError::NotFound(*id))
    }

    async fn count(&self) -> Result<usize, SessionStoreError> {
        Ok(self.sessions.read().await.len())
    }
}
