//! StartSessionHandler - Command handler for opening an intake session.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeEngine, IntakeSession, SessionError};
use crate::ports::SessionStore;

/// Command to open a new intake session.
#[derive(Debug, Clone, Default)]
pub struct StartSessionCommand;

/// Result of opening a session.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session: IntakeSession,
}

/// Handler for opening sessions.
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
    engine: IntakeEngine,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, engine: IntakeEngine) -> Self {
        Self { store, engine }
    }

    pub async fn handle(&self, _cmd: StartSessionCommand) -> Result<StartSessionResult, SessionError> {
        let session = IntakeSession::start(SessionId::new(), self.engine.greeting());
        self.store.save(&session).await?;

        info!(session_id = %session.id(), "intake session started");
        Ok(StartSessionResult { session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::intake::{IntakePhase, Speaker, GREETING};

    #[tokio::test]
    async fn opens_and_saves_session_with_greeting() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = StartSessionHandler::new(store.clone(), IntakeEngine::new());

        let result = handler.handle(StartSessionCommand).await.unwrap();

        assert_eq!(result.session.state().phase(), IntakePhase::NotStarted);
        assert_eq!(result.session.transcript()[0].speaker, Speaker::Bot);
        assert_eq!(result.session.transcript()[0].text, GREETING);
        let saved = store.find_by_id(result.session.id()).await.unwrap();
        assert_eq!(saved, Some(result.session));
    }

    #[tokio::test]
    async fn each_session_gets_its_own_id() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = StartSessionHandler::new(store.clone(), IntakeEngine::new());

        let a = handler.handle(StartSessionCommand).await.unwrap();
        let b = handler.handle(StartSessionCommand).await.unwrap();

        assert_ne!(a.session.id(), b.session.id());
        assert_eq!(store.count().await.unwrap(), 2);
    }
}
