//! Intake domain module.
//!
//! The step-by-step questionnaire: an ordered field registry, a pure answer
//! validator, free-text command interpretation and the conversation state
//! machine that ties them together.

mod assessment;
mod command;
mod engine;
mod errors;
mod field;
mod glossary;
mod phase;
mod quick;
mod record;
mod registry;
mod session;
mod state;
mod transcript;
mod validator;
mod value;

pub use assessment::{Assessment, RiskBand};
pub use command::{is_skip, is_start_phrase, Command};
pub use engine::{IntakeEngine, Turn, GREETING, HELP_TEXT};
pub use errors::{FieldIssue, IntakeError, SessionError};
pub use field::{FieldKey, FieldKind, FieldSpec, UnknownField, ValidRange};
pub use glossary::{Glossary, GlossaryEntry};
pub use phase::IntakePhase;
pub use quick::quick_assessment;
pub use record::PatientRecord;
pub use registry::FieldRegistry;
pub use session::IntakeSession;
pub use state::{ConversationState, PredictionOutcome};
pub use transcript::{Speaker, TranscriptEntry};
pub use validator::{validate, validate_field, ValidationOutcome};
pub use value::{AnswerSet, FieldValue};
