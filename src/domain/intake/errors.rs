//! Intake error types.
//!
//! `IntakeError` is the recoverable, per-turn notice rendered back to the
//! user. `SessionError` is what the application layer returns to callers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::field::FieldKey;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

/// A recoverable problem with one turn. The conversation continues.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntakeError {
    /// The answer was rejected; the same field stays awaited.
    #[error("{message}")]
    Validation { field: FieldKey, message: String },

    #[error("I didn't understand that. Type 'help' for instructions.")]
    UnrecognizedInput,

    /// Input before the user agreed to begin.
    #[error("Hi! Ready to start? Just say 'yes' or 'let's go'!")]
    NotStarted,

    /// The classifier could not score the record; restart required.
    #[error("Prediction error: {reason}")]
    PredictionFailed { reason: String },
}

impl IntakeError {
    pub fn validation(field: FieldKey, message: impl Into<String>) -> Self {
        IntakeError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn prediction_failed(reason: impl Into<String>) -> Self {
        IntakeError::PredictionFailed {
            reason: reason.into(),
        }
    }
}

/// One rejected field in an all-at-once submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by intake session operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// Message was blank after trimming.
    EmptyMessage,
    /// Message exceeded the configured length.
    MessageTooLong { max: usize },
    /// One or more answers of a quick assessment were rejected.
    InvalidAnswers(Vec<FieldIssue>),
    /// The prediction collaborator failed outside a conversation.
    Prediction(String),
    /// Storage or invariant failure.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn prediction(message: impl Into<String>) -> Self {
        SessionError::Prediction(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::EmptyMessage => ErrorCode::EmptyField,
            SessionError::MessageTooLong { .. } => ErrorCode::MessageTooLong,
            SessionError::InvalidAnswers(_) => ErrorCode::InvalidAnswers,
            SessionError::Prediction(_) => ErrorCode::PredictionFailed,
            SessionError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::EmptyMessage => "Message cannot be empty".to_string(),
            SessionError::MessageTooLong { max } => {
                format!("Message exceeds {} characters", max)
            }
            SessionError::InvalidAnswers(issues) => {
                format!("{} answer(s) were rejected", issues.len())
            }
            SessionError::Prediction(msg) => format!("Prediction failed: {}", msg),
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::from(DomainError::from(err))
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::PredictionFailed => SessionError::Prediction(err.message),
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}
