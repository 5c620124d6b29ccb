//! Turn driver.
//!
//! `IntakeEngine` runs one raw input through the command interpreter, the
//! validator and the state transitions, and returns the new state with the
//! bot's replies. It never performs I/O: when a turn completes the
//! questionnaire, the record to score is handed back in `Turn::completed`
//! and the caller reports the classifier's answer via `apply_prediction`.

use super::assessment::Assessment;
use super::command::{is_skip, is_start_phrase, Command};
use super::errors::IntakeError;
use super::field::FieldKey;
use super::glossary::Glossary;
use super::phase::IntakePhase;
use super::record::PatientRecord;
use super::registry::FieldRegistry;
use super::state::ConversationState;
use super::validator::validate_field;
use crate::domain::foundation::ValidationError;

pub const GREETING: &str = "Hello! I'm your Heart Health Assistant!\n\n\
I'll help assess your heart disease risk by asking about your health. \
Don't worry - this takes just a few minutes, and I'll explain everything along the way!\n\n\
Type 'help' anytime for assistance, or 'what is [term]' for explanations.\n\n\
Ready to start? Just say 'yes' or 'let's go'!";

pub const HELP_TEXT: &str = "Help Menu:\n\n\
- Type 'what is [term]' for explanations (e.g., 'what is ATA')\n\
- Type 'restart' to start over\n\
- Type 'skip' to use default values for current question\n\
- For yes/no questions: 'yes', 'no', or 'unknown'\n\
I'm here to help!";

const RESTART_TEXT: &str = "Let's start fresh. Ready? Say 'yes' or 'let's go'.";
const COMPLETE_TEXT: &str = "All done! Analyzing your data now...";

/// Result of handling one input.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub state: ConversationState,
    /// Bot replies in display order.
    pub replies: Vec<String>,
    /// Recoverable problem with this turn, if any.
    pub notice: Option<IntakeError>,
    /// Set exactly when this turn entered `Complete`.
    pub completed: Option<PatientRecord>,
}

impl Turn {
    fn new(state: ConversationState) -> Self {
        Self {
            state,
            replies: Vec::new(),
            notice: None,
            completed: None,
        }
    }

    fn reply(mut self, text: impl Into<String>) -> Self {
        self.replies.push(text.into());
        self
    }

    fn with_notice(mut self, notice: IntakeError) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Stateless turn driver over a registry and glossary.
#[derive(Debug, Clone, Copy)]
pub struct IntakeEngine {
    registry: &'static FieldRegistry,
    glossary: &'static Glossary,
}

impl IntakeEngine {
    pub fn new() -> Self {
        Self {
            registry: FieldRegistry::global(),
            glossary: Glossary::global(),
        }
    }

    pub fn registry(&self) -> &'static FieldRegistry {
        self.registry
    }

    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    /// Handles one raw user input.
    ///
    /// Only invariant violations are errors; everything the user can type
    /// produces a `Turn`.
    pub fn handle(&self, state: ConversationState, raw: &str) -> Result<Turn, ValidationError> {
        match Command::interpret(raw, self.glossary) {
            Command::Help => Ok(Turn::new(state).reply(HELP_TEXT)),
            Command::Restart => {
                let mut state = state;
                state.restart()?;
                Ok(Turn::new(state).reply(RESTART_TEXT))
            }
            Command::Explain(entry) => Ok(Turn::new(state).reply(format!(
                "{} Explanation:\n\n{}",
                entry.term, entry.explanation
            ))),
            Command::Input(text) => self.handle_input(state, &text),
        }
    }

    /// Records the classifier's answer for a completed conversation.
    ///
    /// A probability outside `[0, 1]` is treated as a failure.
    pub fn apply_prediction(
        &self,
        state: ConversationState,
        result: Result<f64, String>,
    ) -> Result<Turn, ValidationError> {
        let mut state = state;
        let scored = result.and_then(|probability| {
            let record = PatientRecord::materialize(self.registry, state.answers())
                .map_err(|e| e.to_string())?;
            Assessment::new(probability, record).map_err(|e| e.to_string())
        });

        match scored {
            Ok(assessment) => {
                let summary = assessment.summary();
                state.record_assessment(assessment)?;
                Ok(Turn::new(state).reply(summary))
            }
            Err(reason) => {
                state.record_prediction_failure(reason.clone())?;
                Ok(Turn::new(state)
                    .reply(format!("Prediction error: {}\nPlease try restarting.", reason))
                    .with_notice(IntakeError::prediction_failed(reason)))
            }
        }
    }

    fn handle_input(&self, state: ConversationState, text: &str) -> Result<Turn, ValidationError> {
        match state.phase() {
            IntakePhase::NotStarted => self.handle_not_started(state, text),
            IntakePhase::AwaitingField(key) => self.handle_answer(state, key, text),
            IntakePhase::Complete => Ok(Turn::new(state)
                .reply(IntakeError::UnrecognizedInput.to_string())
                .with_notice(IntakeError::UnrecognizedInput)),
        }
    }

    fn handle_not_started(
        &self,
        mut state: ConversationState,
        text: &str,
    ) -> Result<Turn, ValidationError> {
        if !is_start_phrase(text) {
            return Ok(Turn::new(state)
                .reply(IntakeError::NotStarted.to_string())
                .with_notice(IntakeError::NotStarted));
        }

        state.begin(self.registry)?;
        let question = match state.awaiting() {
            Some(key) => self.question(key)?,
            None => String::new(),
        };
        Ok(Turn::new(state).reply(format!("Great! Let's start.\n\n{}", question)))
    }

    fn handle_answer(
        &self,
        mut state: ConversationState,
        key: FieldKey,
        text: &str,
    ) -> Result<Turn, ValidationError> {
        let spec = self
            .registry
            .get(key)
            .ok_or_else(|| ValidationError::missing_field(key.as_str()))?;

        let (value, ack) = if is_skip(text) {
            (
                spec.default_value.clone(),
                format!("Using default for {}, moving on...", key),
            )
        } else {
            let outcome = validate_field(spec, text);
            match outcome.value {
                Some(value) => {
                    let note = outcome.message.unwrap_or_default();
                    (value, format!("Recorded {}. {}", key, note).trim_end().to_string())
                }
                None => {
                    let message = outcome
                        .message
                        .unwrap_or_else(|| "Invalid input format.".to_string());
                    return Ok(Turn::new(state)
                        .reply(message.clone())
                        .with_notice(IntakeError::validation(key, message)));
                }
            }
        };

        let phase = state.record_answer(self.registry, key, value)?;
        let turn = Turn::new(state).reply(ack);

        match phase {
            IntakePhase::AwaitingField(next) => Ok(turn.reply(self.question(next)?)),
            IntakePhase::Complete => {
                let record = PatientRecord::materialize(self.registry, turn.state.answers())?;
                let mut turn = turn.reply(COMPLETE_TEXT);
                turn.completed = Some(record);
                Ok(turn)
            }
            IntakePhase::NotStarted => Ok(turn),
        }
    }

    fn question(&self, key: FieldKey) -> Result<String, ValidationError> {
        let spec = self
            .registry
            .get(key)
            .ok_or_else(|| ValidationError::missing_field(key.as_str()))?;
        let number = self.registry.question_number(key).unwrap_or(1);
        Ok(format!(
            "Question {}/{}: {}",
            number,
            self.registry.len(),
            spec.prompt
        ))
    }
}

impl Default for IntakeEngine {
    fn default() -> Self {
        Self::new()
    }
}
