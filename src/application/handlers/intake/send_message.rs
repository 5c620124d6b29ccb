//! SendMessageHandler - Command handler for one conversation turn.
//!
//! Loads the session, runs the input through the engine, asks the
//! prediction service to score the record when the turn completes the
//! questionnaire, and saves the session back.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::foundation::SessionId;
use crate::domain::intake::{
    Assessment, IntakeEngine, IntakeError, IntakeSession, PatientRecord, SessionError,
    TranscriptEntry,
};
use crate::ports::{PredictionError, PredictionService, SessionStore};

/// Default cap on message length, in characters.
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 500;

/// Default limit on one prediction, retries included.
pub const DEFAULT_PREDICTION_TIMEOUT: Duration = Duration::from_secs(21);

/// Command carrying one user message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub session_id: SessionId,
    pub content: String,
}

impl SendMessageCommand {
    pub fn new(session_id: SessionId, content: impl Into<String>) -> Self {
        Self {
            session_id,
            content: content.into(),
        }
    }
}

/// Result of one turn.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    /// Session after the turn.
    pub session: IntakeSession,
    /// Transcript entries added by this turn, user message first.
    pub entries: Vec<TranscriptEntry>,
    /// Recoverable problems reported during the turn.
    pub notices: Vec<IntakeError>,
}

impl SendMessageResult {
    /// Assessment produced by this or an earlier turn.
    pub fn assessment(&self) -> Option<&Assessment> {
        self.session.state().assessment()
    }
}

/// Handler for conversation turns.
pub struct SendMessageHandler {
    store: Arc<dyn SessionStore>,
    predictor: Arc<dyn PredictionService>,
    engine: IntakeEngine,
    max_message_chars: usize,
    prediction_timeout: Duration,
}

impl SendMessageHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        predictor: Arc<dyn PredictionService>,
        engine: IntakeEngine,
    ) -> Self {
        Self {
            store,
            predictor,
            engine,
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
            prediction_timeout: DEFAULT_PREDICTION_TIMEOUT,
        }
    }

    pub fn with_max_message_chars(mut self, max: usize) -> Self {
        self.max_message_chars = max;
        self
    }

    /// Caps how long the turn waits for the predictor. Must stay below the
    /// HTTP request timeout so the failure reaches the session.
    pub fn with_prediction_timeout(mut self, limit: Duration) -> Self {
        self.prediction_timeout = limit;
        self
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, SessionError> {
        // 1. Validate the message
        let content = cmd.content.trim();
        if content.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        if content.chars().count() > self.max_message_chars {
            return Err(SessionError::MessageTooLong {
                max: self.max_message_chars,
            });
        }

        // 2. Load the session
        let mut session = self
            .store
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;
        let mark = session.transcript().len();

        // 3. Run the turn
        session.record_user_message(content);
        let turn = self.engine.handle(session.state().clone(), content)?;
        let mut notices: Vec<IntakeError> = turn.notice.iter().cloned().collect();
        debug!(
            session_id = %cmd.session_id,
            phase = ?turn.state.phase(),
            notice = ?turn.notice,
            "turn handled"
        );

        // 4. Score the record if the questionnaire just completed
        if let Some(record) = session.apply_turn(turn) {
            info!(session_id = %cmd.session_id, "questionnaire complete, requesting prediction");

            let result = predict_within(self.predictor.as_ref(), &record, self.prediction_timeout)
                .await
                .map_err(|e| {
                    warn!(session_id = %cmd.session_id, error = %e, "prediction failed");
                    e.to_string()
                });
            let turn = self.engine.apply_prediction(session.state().clone(), result)?;
            notices.extend(turn.notice.iter().cloned());
            session.apply_turn(turn);

            if let Some(assessment) = session.state().assessment() {
                info!(
                    session_id = %cmd.session_id,
                    risk_percent = assessment.risk_percent,
                    risk_band = %assessment.risk_band,
                    "assessment scored"
                );
            }
        }

        // 5. Save
        self.store.save(&session).await?;

        let entries = session.transcript_since(mark).to_vec();
        Ok(SendMessageResult {
            session,
            entries,
            notices,
        })
    }
}

/// Runs one prediction, turning an overrun into `PredictionError::Timeout`.
pub(crate) async fn predict_within(
    predictor: &dyn PredictionService,
    record: &PatientRecord,
    limit: Duration,
) -> Result<f64, PredictionError> {
    timeout(limit, predictor.predict(record))
        .await
        .unwrap_or(Err(PredictionError::Timeout {
            timeout_secs: limit.as_secs(),
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::prediction::MockPredictionService;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::intake::{
        FieldKey, FieldValue, IntakePhase, PredictionOutcome, Speaker, GREETING,
    };
    use crate::ports::{PredictionError, SessionStoreError};
    use async_trait::async_trait;

    struct Fixture {
        store: Arc<InMemorySessionStore>,
        predictor: MockPredictionService,
        handler: SendMessageHandler,
        session_id: SessionId,
    }

    async fn fixture(predictor: MockPredictionService) -> Fixture {
        let store = Arc::new(InMemorySessionStore::new());
        let session = IntakeSession::start(SessionId::new(), GREETING);
        store.save(&session).await.unwrap();

        let handler = SendMessageHandler::new(
            store.clone(),
            Arc::new(predictor.clone()),
            IntakeEngine::new(),
        );

        Fixture {
            store,
            predictor,
            handler,
            session_id: *session.id(),
        }
    }

    impl Fixture {
        async fn send(&self, content: &str) -> Result<SendMessageResult, SessionError> {
            self.handler
                .handle(SendMessageCommand::new(self.session_id, content))
                .await
        }

        async fn complete(&self) -> SendMessageResult {
            self.send("yes").await.unwrap();
            let mut last = None;
            for _ in FieldKey::ALL {
                last = Some(self.send("skip").await.unwrap());
            }
            last.unwrap()
        }
    }

    mod validation {
        use super::*;

        #[tokio::test]
        async fn rejects_blank_message() {
            let f = fixture(MockPredictionService::new()).await;
            assert_eq!(f.send("   ").await.unwrap_err(), SessionError::EmptyMessage);
        }

        #[tokio::test]
        async fn rejects_overlong_message() {
            let f = fixture(MockPredictionService::new()).await;
            let handler = SendMessageHandler::new(
                f.store.clone(),
                Arc::new(MockPredictionService::new()),
                IntakeEngine::new(),
            )
            .with_max_message_chars(5);

            let err = handler
                .handle(SendMessageCommand::new(f.session_id, "123456"))
                .await
                .unwrap_err();
            assert_eq!(err, SessionError::MessageTooLong { max: 5 });
        }

        #[tokio::test]
        async fn unknown_session_is_not_found() {
            let f = fixture(MockPredictionService::new()).await;
            let id = SessionId::new();
            let err = f
                .handler
                .handle(SendMessageCommand::new(id, "yes"))
                .await
                .unwrap_err();
            assert_eq!(err, SessionError::NotFound(id));
        }
    }

    mod turns {
        use super::*;

        #[tokio::test]
        async fn returns_user_entry_then_replies() {
            let f = fixture(MockPredictionService::new()).await;

            let result = f.send("yes").await.unwrap();

            assert_eq!(result.entries.len(), 2);
            assert_eq!(result.entries[0].speaker, Speaker::User);
            assert_eq!(result.entries[0].text, "yes");
            assert_eq!(result.entries[1].speaker, Speaker::Bot);
            assert!(result.notices.is_empty());
        }

        #[tokio::test]
        async fn persists_state_between_turns() {
            let f = fixture(MockPredictionService::new()).await;
            f.send("yes").await.unwrap();
            f.send("58").await.unwrap();

            let saved = f.store.find_by_id(&f.session_id).await.unwrap().unwrap();
            assert_eq!(saved.state().phase(), IntakePhase::AwaitingField(FieldKey::Sex));
            assert_eq!(
                saved.state().answers().get(FieldKey::Age),
                Some(&FieldValue::Integer(58))
            );
        }

        #[tokio::test]
        async fn rejected_answer_is_reported_as_notice() {
            let f = fixture(MockPredictionService::new()).await;
            f.send("yes").await.unwrap();

            let result = f.send("7").await.unwrap();

            assert!(matches!(
                result.notices.as_slice(),
                [IntakeError::Validation { field: FieldKey::Age, .. }]
            ));
        }
    }

    mod completion {
        use super::*;

        #[tokio::test]
        async fn scores_record_once_on_completion() {
            let f = fixture(MockPredictionService::new().with_probability(0.81)).await;

            let result = f.complete().await;

            assert_eq!(f.predictor.call_count(), 1);
            let assessment = result.assessment().unwrap();
            assert_eq!(assessment.probability, 0.81);
            assert_eq!(
                result.entries.last().map(|e| e.text.as_str()),
                Some("Prediction complete! Your heart disease risk is 81.0%.")
            );
        }

        #[tokio::test]
        async fn prediction_failure_becomes_notice() {
            let f = fixture(
                MockPredictionService::new().with_error(PredictionError::unavailable("offline")),
            )
            .await;

            let result = f.complete().await;

            assert!(matches!(
                result.notices.last(),
                Some(IntakeError::PredictionFailed { .. })
            ));
            assert!(matches!(
                result.session.state().outcome(),
                Some(PredictionOutcome::Failed { .. })
            ));
        }

        #[tokio::test]
        async fn hanging_predictor_times_out_into_failed_outcome() {
            let predictor =
                MockPredictionService::new().with_delay(Duration::from_millis(500));
            let f = fixture(predictor).await;
            let handler = SendMessageHandler::new(
                f.store.clone(),
                Arc::new(f.predictor.clone()),
                IntakeEngine::new(),
            )
            .with_prediction_timeout(Duration::from_millis(50));

            handler
                .handle(SendMessageCommand::new(f.session_id, "yes"))
                .await
                .unwrap();
            let mut last = None;
            for _ in FieldKey::ALL {
                last = Some(
                    handler
                        .handle(SendMessageCommand::new(f.session_id, "skip"))
                        .await
                        .unwrap(),
                );
            }
            let result = last.unwrap();

            assert!(matches!(
                result.notices.last(),
                Some(IntakeError::PredictionFailed { .. })
            ));
            let saved = f.store.find_by_id(&f.session_id).await.unwrap().unwrap();
            assert_eq!(saved.state().phase(), IntakePhase::Complete);
            assert!(matches!(
                saved.state().outcome(),
                Some(PredictionOutcome::Failed { .. })
            ));
        }

        #[tokio::test]
        async fn input_after_completion_does_not_rescore() {
            let f = fixture(MockPredictionService::new()).await;
            f.complete().await;

            let result = f.send("hello").await.unwrap();

            assert_eq!(f.predictor.call_count(), 1);
            assert_eq!(result.notices, vec![IntakeError::UnrecognizedInput]);
        }

        #[tokio::test]
        async fn restart_after_completion_allows_new_run() {
            let f = fixture(MockPredictionService::new()).await;
            f.complete().await;

            let result = f.send("restart").await.unwrap();
            assert_eq!(result.session.state().phase(), IntakePhase::NotStarted);
            assert!(result.session.state().outcome().is_none());

            f.complete().await;
            assert_eq!(f.predictor.call_count(), 2);
        }
    }

    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn save(&self, _session: &IntakeSession) -> Result<(), SessionStoreError> {
            Err(SessionStoreError::Unavailable("disk full".to_string()))
        }

        async fn find_by_id(
            &self,
            id: &SessionId,
        ) -> Result<Option<IntakeSession>, SessionStoreError> {
            Ok(Some(IntakeSession::start(*id, GREETING)))
        }

        async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError> {
            Err(SessionStoreError::NotFound(*id))
        }

        async fn count(&self) -> Result<usize, SessionStoreError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn store_failure_is_infrastructure_error() {
        let handler = SendMessageHandler::new(
            Arc::new(FailingStore),
            Arc::new(MockPredictionService::new()),
            IntakeEngine::new(),
        );

        let err = handler
            .handle(SendMessageCommand::new(SessionId::new(), "yes"))
            .await
            .unwrap_err();

        assert_eq!(err, SessionError::Infrastructure("disk full".to_string()));
    }
}
