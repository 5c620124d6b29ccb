//! QuickAssessmentHandler - Command handler for all-fields-at-once scoring.
//!
//! No session is created; the answers are validated, filled with defaults
//! and scored in one call.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::send_message::{predict_within, DEFAULT_PREDICTION_TIMEOUT};
use crate::domain::intake::{quick_assessment, Assessment, IntakeEngine, SessionError};
use crate::ports::PredictionService;

/// Raw answers keyed by column name (e.g., "RestingBP" → "130").
#[derive(Debug, Clone, Default)]
pub struct QuickAssessmentCommand {
    pub answers: BTreeMap<String, String>,
}

/// Handler for quick assessments.
pub struct QuickAssessmentHandler {
    predictor: Arc<dyn PredictionService>,
    engine: IntakeEngine,
    prediction_timeout: Duration,
}

impl QuickAssessmentHandler {
    pub fn new(predictor: Arc<dyn PredictionService>, engine: IntakeEngine) -> Self {
        Self {
            predictor,
            engine,
            prediction_timeout: DEFAULT_PREDICTION_TIMEOUT,
        }
    }

    pub fn with_prediction_timeout(mut self, limit: Duration) -> Self {
        self.prediction_timeout = limit;
        self
    }

    pub async fn handle(&self, cmd: QuickAssessmentCommand) -> Result<Assessment, SessionError> {
        let record = quick_assessment(self.engine.registry(), &cmd.answers).map_err(|issues| {
            warn!(rejected = issues.len(), "quick assessment rejected");
            SessionError::InvalidAnswers(issues)
        })?;

        let probability =
            predict_within(self.predictor.as_ref(), &record, self.prediction_timeout).await?;
        let assessment = Assessment::new(probability, record)
            .map_err(|e| SessionError::prediction(e.to_string()))?;

        info!(
            risk_percent = assessment.risk_percent,
            risk_band = %assessment.risk_band,
            "quick assessment scored"
        );
        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::prediction::MockPredictionService;
    use crate::domain::intake::{FieldIssue, RiskBand};
    use crate::ports::PredictionError;

    fn command(pairs: &[(&str, &str)]) -> QuickAssessmentCommand {
        QuickAssessmentCommand {
            answers: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[tokio::test]
    async fn scores_valid_answers() {
        let predictor = MockPredictionService::new().with_probability(0.55);
        let handler = QuickAssessmentHandler::new(Arc::new(predictor.clone()), IntakeEngine::new());

        let assessment = handler
            .handle(command(&[("Age", "61"), ("Sex", "F")]))
            .await
            .unwrap();

        assert_eq!(assessment.risk_band, RiskBand::Moderate);
        assert_eq!(assessment.record.age, 61);
        assert_eq!(predictor.call_count(), 1);
    }

    #[tokio::test]
    async fn invalid_answers_skip_prediction() {
        let predictor = MockPredictionService::new();
        let handler = QuickAssessmentHandler::new(Arc::new(predictor.clone()), IntakeEngine::new());

        let err = handler
            .handle(command(&[("Oldpeak", "9")]))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SessionError::InvalidAnswers(vec![FieldIssue::new(
                "Oldpeak",
                "Please enter a value between 0 and 6."
            )])
        );
        assert_eq!(predictor.call_count(), 0);
    }

    #[tokio::test]
    async fn prediction_failure_is_reported() {
        let predictor = MockPredictionService::new().with_error(PredictionError::Timeout {
            timeout_secs: 10,
        });
        let handler = QuickAssessmentHandler::new(Arc::new(predictor), IntakeEngine::new());

        let err = handler.handle(command(&[])).await.unwrap_err();

        assert_eq!(
            err,
            SessionError::Prediction("request timed out after 10s".to_string())
        );
    }

    #[tokio::test]
    async fn slow_predictor_is_cut_off() {
        let predictor = MockPredictionService::new().with_delay(Duration::from_millis(500));
        let handler = QuickAssessmentHandler::new(Arc::new(predictor), IntakeEngine::new())
            .with_prediction_timeout(Duration::from_millis(20));

        let err = handler.handle(command(&[])).await.unwrap_err();

        assert!(
            matches!(&err, SessionError::Prediction(message) if message.contains("timed out")),
            "{:?}",
            err
        );
    }
}
