//! HTTP handlers for intake endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Duration;

use super::dto::{
    AssessmentResponse, ErrorResponse, FieldListResponse, QuickAssessmentRequest,
    SendMessageRequest, SessionResponse, TurnResponse,
};
use crate::application::handlers::intake::{
    EndSessionCommand, EndSessionHandler, GetSessionHandler, GetSessionQuery, ListFieldsHandler,
    QuickAssessmentCommand, QuickAssessmentHandler, SendMessageCommand, SendMessageHandler,
    StartSessionCommand, StartSessionHandler, DEFAULT_MAX_MESSAGE_CHARS,
    DEFAULT_PREDICTION_TIMEOUT,
};
use crate::domain::foundation::SessionId;
use crate::domain::intake::{IntakeEngine, SessionError};
use crate::ports::{PredictionService, SessionStore};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for intake handlers.
#[derive(Clone)]
pub struct IntakeAppState {
    pub session_store: Arc<dyn SessionStore>,
    pub predictor: Arc<dyn PredictionService>,
    pub engine: IntakeEngine,
    pub max_message_chars: usize,
    pub prediction_timeout: Duration,
}

impl IntakeAppState {
    pub fn new(
        session_store: Arc<dyn SessionStore>,
        predictor: Arc<dyn PredictionService>,
    ) -> Self {
        Self {
            session_store,
            predictor,
            engine: IntakeEngine::new(),
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
            prediction_timeout: DEFAULT_PREDICTION_TIMEOUT,
        }
    }

    pub fn with_max_message_chars(mut self, max: usize) -> Self {
        self.max_message_chars = max;
        self
    }

    pub fn with_prediction_timeout(mut self, limit: Duration) -> Self {
        self.prediction_timeout = limit;
        self
    }

    pub fn start_session_handler(&self) -> StartSessionHandler {
        StartSessionHandler::new(self.session_store.clone(), self.engine)
    }

    pub fn get_session_handler(&self) -> GetSessionHandler {
        GetSessionHandler::new(self.session_store.clone())
    }

    pub fn end_session_handler(&self) -> EndSessionHandler {
        EndSessionHandler::new(self.session_store.clone())
    }

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(
            self.session_store.clone(),
            self.predictor.clone(),
            self.engine,
        )
        .with_max_message_chars(self.max_message_chars)
        .with_prediction_timeout(self.prediction_timeout)
    }

    pub fn quick_assessment_handler(&self) -> QuickAssessmentHandler {
        QuickAssessmentHandler::new(self.predictor.clone(), self.engine)
            .with_prediction_timeout(self.prediction_timeout)
    }

    pub fn list_fields_handler(&self) -> ListFieldsHandler {
        ListFieldsHandler::new(self.engine)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/intake/fields - Questionnaire definition
pub async fn list_fields(State(state): State<IntakeAppState>) -> impl IntoResponse {
    let fields = state.list_fields_handler().handle();
    Json(FieldListResponse {
        fields: fields.iter().map(Into::into).collect(),
    })
}

/// POST /api/intake/sessions - Open a conversation
pub async fn start_session(
    State(state): State<IntakeAppState>,
) -> Result<impl IntoResponse, IntakeApiError> {
    let result = state
        .start_session_handler()
        .handle(StartSessionCommand)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::from(&result.session)),
    ))
}

/// GET /api/intake/sessions/:id - Session with transcript
pub async fn get_session(
    State(state): State<IntakeAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, IntakeApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .get_session_handler()
        .handle(GetSessionQuery { session_id })
        .await?;

    Ok(Json(SessionResponse::from(&session)))
}

/// DELETE /api/intake/sessions/:id - Discard a session
pub async fn end_session(
    State(state): State<IntakeAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, IntakeApiError> {
    let session_id = parse_session_id(&id)?;
    state
        .end_session_handler()
        .handle(EndSessionCommand { session_id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/intake/sessions/:id/messages - One conversation turn
pub async fn send_message(
    State(state): State<IntakeAppState>,
    Path(id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, IntakeApiError> {
    let session_id = parse_session_id(&id)?;
    let result = state
        .send_message_handler()
        .handle(SendMessageCommand::new(session_id, request.content))
        .await?;

    Ok(Json(TurnResponse::from(&result)))
}

/// POST /api/intake/assessments - Score all answers at once
pub async fn quick_assessment(
    State(state): State<IntakeAppState>,
    Json(request): Json<QuickAssessmentRequest>,
) -> Result<impl IntoResponse, IntakeApiError> {
    let assessment = state
        .quick_assessment_handler()
        .handle(QuickAssessmentCommand {
            answers: request.answers,
        })
        .await?;

    Ok(Json(AssessmentResponse::from(&assessment)))
}

fn parse_session_id(raw: &str) -> Result<SessionId, IntakeApiError> {
    raw.parse()
        .map_err(|_| IntakeApiError::BadRequest("Invalid session ID".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper that converts to HTTP responses.
#[derive(Debug)]
pub enum IntakeApiError {
    BadRequest(String),
    Session(SessionError),
}

impl From<SessionError> for IntakeApiError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl IntoResponse for IntakeApiError {
    fn into_response(self) -> Response {
        match self {
            IntakeApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(message)),
            )
                .into_response(),
            IntakeApiError::Session(err) => handle_session_error(err),
        }
    }
}

fn handle_session_error(err: SessionError) -> Response {
    let status = match &err {
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::EmptyMessage | SessionError::MessageTooLong { .. } => {
            StatusCode::BAD_REQUEST
        }
        SessionError::InvalidAnswers(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Prediction(_) => StatusCode::BAD_GATEWAY,
        SessionError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let mut body = ErrorResponse::new(err.code().to_string(), err.message());
    if let SessionError::InvalidAnswers(issues) = &err {
        body = body.with_issues(issues);
    }
    if status.is_server_error() {
        tracing::error!(error = %err, "intake request failed");
    }

    (status, Json(body)).into_response()
}
