//! EndSessionHandler - Command handler for discarding an intake session.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::SessionId;
use crate::domain::intake::SessionError;
use crate::ports::SessionStore;

/// Command to discard a session and its answers.
#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_id: SessionId,
}

/// Handler for discarding sessions.
pub struct EndSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl EndSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: EndSessionCommand) -> Result<(), SessionError> {
        self.store.delete(&cmd.session_id).await?;
        info!(session_id = %cmd.session_id, "intake session ended");
        Ok(())
    }
}
