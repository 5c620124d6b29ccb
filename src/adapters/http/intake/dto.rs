//! HTTP DTOs (Data Transfer Objects) for intake endpoints.
//!
//! These types define the JSON request/response structure for the intake API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::SendMessageResult;
use crate::domain::intake::{
    AnswerSet, Assessment, FieldIssue, FieldKind, FieldSpec, IntakeError, IntakePhase,
    IntakeSession, PredictionOutcome, Speaker, TranscriptEntry, ValidRange,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One user message in a conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// All answers at once, keyed by column name.
#[derive(Debug, Clone, Deserialize)]
pub struct QuickAssessmentRequest {
    pub answers: BTreeMap<String, String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One questionnaire field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldResponse {
    pub key: String,
    pub label: String,
    pub prompt: String,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<ValidRange>,
}

impl From<&FieldSpec> for FieldResponse {
    fn from(spec: &FieldSpec) -> Self {
        Self {
            key: spec.key.as_str().to_string(),
            label: spec.label.to_string(),
            prompt: spec.prompt.to_string(),
            kind: spec.kind,
            range: spec.range,
        }
    }
}

/// List of questionnaire fields in asking order.
#[derive(Debug, Clone, Serialize)]
pub struct FieldListResponse {
    pub fields: Vec<FieldResponse>,
}

/// One line of the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntryResponse {
    pub speaker: Speaker,
    pub text: String,
    pub at: String,
}

impl From<&TranscriptEntry> for TranscriptEntryResponse {
    fn from(entry: &TranscriptEntry) -> Self {
        Self {
            speaker: entry.speaker,
            text: entry.text.clone(),
            at: entry.at.to_rfc3339(),
        }
    }
}

/// A recoverable problem reported during a turn.
#[derive(Debug, Clone, Serialize)]
pub struct NoticeResponse {
    /// Text shown to the user.
    pub text: String,
    #[serde(flatten)]
    pub detail: IntakeError,
}

impl From<&IntakeError> for NoticeResponse {
    fn from(err: &IntakeError) -> Self {
        Self {
            text: err.to_string(),
            detail: err.clone(),
        }
    }
}

/// Scored assessment.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    pub probability: f64,
    pub risk_percent: f64,
    pub risk_band: String,
    pub advice: String,
    pub summary: String,
}

impl From<&Assessment> for AssessmentResponse {
    fn from(assessment: &Assessment) -> Self {
        Self {
            probability: assessment.probability,
            risk_percent: assessment.risk_percent,
            risk_band: assessment.risk_band.to_string(),
            advice: assessment.risk_band.advice().to_string(),
            summary: assessment.summary(),
        }
    }
}

/// Full session view.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub phase: IntakePhase,
    pub answers: AnswerSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<PredictionOutcome>,
    pub transcript: Vec<TranscriptEntryResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&IntakeSession> for SessionResponse {
    fn from(session: &IntakeSession) -> Self {
        let state = session.state();
        Self {
            id: session.id().to_string(),
            phase: state.phase(),
            answers: state.answers().clone(),
            outcome: state.outcome().cloned(),
            transcript: session.transcript().iter().map(Into::into).collect(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

/// Result of one conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub session_id: String,
    pub phase: IntakePhase,
    pub entries: Vec<TranscriptEntryResponse>,
    pub notices: Vec<NoticeResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<AssessmentResponse>,
}

impl From<&SendMessageResult> for TurnResponse {
    fn from(result: &SendMessageResult) -> Self {
        Self {
            session_id: result.session.id().to_string(),
            phase: result.session.state().phase(),
            entries: result.entries.iter().map(Into::into).collect(),
            notices: result.notices.iter().map(Into::into).collect(),
            assessment: result.assessment().map(Into::into),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Lists rejected answers under `details.issues`.
    pub fn with_issues(self, issues: &[FieldIssue]) -> Self {
        self.with_details(serde_json::json!({ "issues": issues }))
    }
}
