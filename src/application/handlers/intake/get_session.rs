//! GetSessionHandler - Query handler for reading one intake session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeSession, SessionError};
use crate::ports::SessionStore;

/// Query for a single session.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for session reads.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<IntakeSession, SessionError> {
        self.store
            .find_by_id(&query.session_id)
            .await?
            .ok_or(SessionError::NotFound(query.session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::intake::GREETING;

    #[tokio::test]
    async fn returns_stored_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = IntakeSession::start(SessionId::new(), GREETING);
        store.save(&session).await.unwrap();

        let handler = GetSessionHandler::new(store);
        let found = handler
            .handle(GetSessionQuery { session_id: *session.id() })
            .await
            .unwrap();

        assert_eq!(found, session);
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let handler = GetSessionHandler::new(Arc::new(InMemorySessionStore::new()));
        let id = SessionId::new();

        let err = handler.handle(GetSessionQuery { session_id: id }).await.unwrap_err();
        assert_eq!(err, SessionError::NotFound(id));
    }
}
