//! Axum router configuration for intake endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    end_session, get_session, list_fields, quick_assessment, send_message, start_session,
    IntakeAppState,
};

/// Create the intake API router.
///
/// # Routes
///
/// - `GET /api/intake/fields` - Questionnaire definition
/// - `POST /api/intake/sessions` - Open a conversation
/// - `GET /api/intake/sessions/:id` - Session with transcript
/// - `DELETE /api/intake/sessions/:id` - Discard a session
/// - `POST /api/intake/sessions/:id/messages` - One conversation turn
/// - `POST /api/intake/assessments` - Score all answers at once
pub fn intake_router() -> Router<IntakeAppState> {
    Router::new()
        .route("/api/intake/fields", get(list_fields))
        .route("/api/intake/sessions", post(start_session))
        .route(
            "/api/intake/sessions/:id",
            get(get_session).delete(end_session),
        )
        .route("/api/intake/sessions/:id/messages", post(send_message))
        .route("/api/intake/assessments", post(quick_assessment))
}
