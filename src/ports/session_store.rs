//! Session Store Port - Interface for holding live intake sessions.
//!
//! Sessions are ephemeral: the store keeps them for the lifetime of the
//! process and nothing more.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeSession, SessionError};

/// Errors that can occur in session store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Port for loading and saving intake sessions.
///
/// Saves replace the whole session value; concurrent turns on the same
/// session are last-writer-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Inserts or replaces a session.
    async fn save(&self, session: &IntakeSession) -> Result<(), SessionStoreError>;

    /// Loads a session by ID.
    ///
    /// # Returns
    ///
    /// `None` if no session exists with that ID.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<IntakeSession>, SessionStoreError>;

    /// Removes a session.
    ///
    /// # Errors
    ///
    /// `NotFound` if the session does not exist.
    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError>;

    /// Number of live sessions.
    async fn count(&self) -> Result<usize, SessionStoreError>;
}

impl From<SessionStoreError> for SessionError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => SessionError::NotFound(id),
            SessionStoreError::Unavailable(msg) => SessionError::Infrastructure(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_session_not_found() {
        let id = SessionId::new();
        let err: SessionError = SessionStoreError::NotFound(id).into();
        assert_eq!(err, SessionError::NotFound(id));
    }

    #[test]
    fn unavailable_maps_to_infrastructure() {
        let err: SessionError = SessionStoreError::Unavailable("poisoned".into()).into();
        assert!(matches!(err, SessionError::Infrastructure(_)));
    }
}
