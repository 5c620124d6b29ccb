//! Conversation state: phase, answers and the prediction outcome.

use serde::{Deserialize, Serialize};

use super::assessment::Assessment;
use super::field::FieldKey;
use super::phase::IntakePhase;
use super::registry::FieldRegistry;
use super::value::{AnswerSet, FieldValue};
use crate::domain::foundation::{StateMachine, ValidationError};

/// What came back from the classifier for a completed conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Scored(Assessment),
    Failed { reason: String },
}

/// Explicit conversation value, passed into and returned from each turn.
///
/// # Invariants
///
/// - In `AwaitingField(key)`, `key` is the first registry key not answered
/// - `Complete` implies every key is answered
/// - `outcome` is only set while `Complete`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    phase: IntakePhase,
    answers: AnswerSet,
    outcome: Option<PredictionOutcome>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> IntakePhase {
        self.phase
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        self.outcome.as_ref()
    }

    pub fn awaiting(&self) -> Option<FieldKey> {
        self.phase.awaiting()
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_complete()
    }

    /// Complete, but the classifier has not answered yet.
    pub fn awaiting_prediction(&self) -> bool {
        self.is_complete() && self.outcome.is_none()
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        match &self.outcome {
            Some(PredictionOutcome::Scored(assessment)) => Some(assessment),
            _ => None,
        }
    }

    /// Moves from `NotStarted` to the first unanswered field.
    pub fn begin(&mut self, registry: &FieldRegistry) -> Result<(), ValidationError> {
        let first = registry
            .next_unanswered(&self.answers)
            .ok_or_else(|| ValidationError::invalid_format("registry", "no fields to ask"))?;
        self.phase = self.phase.transition_to(IntakePhase::AwaitingField(first))?;
        Ok(())
    }

    /// Records `value` for the awaited `key` and advances.
    ///
    /// Returns the new phase: the next unanswered field, or `Complete`.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if `key` is not the awaited field
    /// - `InvalidFormat` for an illegal phase transition
    pub fn record_answer(
        &mut self,
        registry: &FieldRegistry,
        key: FieldKey,
        value: FieldValue,
    ) -> Result<IntakePhase, ValidationError> {
        if self.phase.awaiting() != Some(key) {
            return Err(ValidationError::invalid_format(
                key.as_str(),
                format!("not awaiting this field in phase {:?}", self.phase),
            ));
        }

        let mut answers = self.answers.clone();
        answers.insert(key, value);
        let target = match registry.next_unanswered(&answers) {
            Some(next) => IntakePhase::AwaitingField(next),
            None => IntakePhase::Complete,
        };

        self.phase = self.phase.transition_to(target)?;
        self.answers = answers;
        Ok(self.phase)
    }

    /// Back to `NotStarted` with answers and outcome cleared.
    pub fn restart(&mut self) -> Result<(), ValidationError> {
        self.phase = self.phase.transition_to(IntakePhase::NotStarted)?;
        self.answers.clear();
        self.outcome = None;
        Ok(())
    }

    pub fn record_assessment(&mut self, assessment: Assessment) -> Result<(), ValidationError> {
        self.ensure_awaiting_prediction()?;
        self.outcome = Some(PredictionOutcome::Scored(assessment));
        Ok(())
    }

    pub fn record_prediction_failure(
        &mut self,
        reason: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.ensure_awaiting_prediction()?;
        self.outcome = Some(PredictionOutcome::Failed {
            reason: reason.into(),
        });
        Ok(())
    }

    fn ensure_awaiting_prediction(&self) -> Result<(), ValidationError> {
        if self.awaiting_prediction() {
            Ok(())
        } else {
            Err(ValidationError::invalid_format(
                "prediction",
                format!("no prediction pending in phase {:?}", self.phase),
            ))
        }
    }
}
