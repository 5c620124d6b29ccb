//! Scored result of a completed intake.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::PatientRecord;
use crate::domain::foundation::ValidationError;

/// Display band for a risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    LowModerate,
    Moderate,
    High,
}

impl RiskBand {
    /// Bands a percentage in `[0, 100]`. Thresholds are exclusive.
    pub fn from_percent(percent: f64) -> Self {
        if percent > 70.0 {
            RiskBand::High
        } else if percent > 40.0 {
            RiskBand::Moderate
        } else if percent > 20.0 {
            RiskBand::LowModerate
        } else {
            RiskBand::Low
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            RiskBand::High => "HIGH Risk - Please consult a cardiologist immediately!",
            RiskBand::Moderate => "MODERATE Risk - Schedule a check-up with your doctor soon.",
            RiskBand::LowModerate => "LOW-MODERATE Risk - Consider a routine health check.",
            RiskBand::Low => "LOW Risk - Keep up the great work with your health!",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskBand::Low => "low",
            RiskBand::LowModerate => "low_moderate",
            RiskBand::Moderate => "moderate",
            RiskBand::High => "high",
        };
        f.write_str(s)
    }
}

/// Classifier probability with its derived percentage and band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub probability: f64,
    pub risk_percent: f64,
    pub risk_band: RiskBand,
    pub record: PatientRecord,
}

impl Assessment {
    /// # Errors
    ///
    /// `OutOfRange` if `probability` is not a finite value in `[0, 1]`.
    pub fn new(probability: f64, record: PatientRecord) -> Result<Self, ValidationError> {
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(ValidationError::out_of_range(
                "probability",
                0.0,
                1.0,
                probability,
            ));
        }

        let risk_percent = probability * 100.0;
        Ok(Self {
            probability,
            risk_percent,
            risk_band: RiskBand::from_percent(risk_percent),
            record,
        })
    }

    /// "Prediction complete! ..." line shown in the conversation.
    pub fn summary(&self) -> String {
        format!(
            "Prediction complete! Your heart disease risk is {:.1}%.",
            self.risk_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::registry::FieldRegistry;
    use crate::domain::intake::value::AnswerSet;

    fn record() -> PatientRecord {
        PatientRecord::materialize(FieldRegistry::global(), &AnswerSet::new()).unwrap()
    }

    mod bands {
        use super::*;

        #[test]
        fn thresholds_are_exclusive() {
            assert_eq!(RiskBand::from_percent(70.0), RiskBand::Moderate);
            assert_eq!(RiskBand::from_percent(70.1), RiskBand::High);
            assert_eq!(RiskBand::from_percent(40.0), RiskBand::LowModerate);
            assert_eq!(RiskBand::from_percent(20.0), RiskBand::Low);
            assert_eq!(RiskBand::from_percent(20.5), RiskBand::LowModerate);
            assert_eq!(RiskBand::from_percent(0.0), RiskBand::Low);
        }

        #[test]
        fn serializes_snake_case() {
            assert_eq!(
                serde_json::to_string(&RiskBand::LowModerate).unwrap(),
                "\"low_moderate\""
            );
        }
    }

    #[test]
    fn derives_percent_and_band() {
        let assessment = Assessment::new(0.734, record()).unwrap();
        assert!((assessment.risk_percent - 73.4).abs() < 1e-9);
        assert_eq!(assessment.risk_band, RiskBand::High);
        assert_eq!(
            assessment.summary(),
            "Prediction complete! Your heart disease risk is 73.4%."
        );
    }

    #[test]
    fn rejects_probabilities_outside_unit_interval() {
        assert!(Assessment::new(1.2, record()).is_err());
        assert!(Assessment::new(-0.1, record()).is_err());
        assert!(Assessment::new(f64::NAN, record()).is_err());
        assert!(Assessment::new(0.0, record()).is_ok());
        assert!(Assessment::new(1.0, record()).is_ok());
    }
}
