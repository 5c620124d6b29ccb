//! The complete patient record handed to the classifier.

use serde::{Deserialize, Serialize};

use super::field::FieldKey;
use super::registry::FieldRegistry;
use super::value::{AnswerSet, FieldValue};
use crate::domain::foundation::ValidationError;

/// All eleven fields, typed, with the classifier's column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "ChestPainType")]
    pub chest_pain_type: String,
    #[serde(rename = "RestingBP")]
    pub resting_bp: i64,
    #[serde(rename = "Cholesterol")]
    pub cholesterol: i64,
    #[serde(rename = "FastingBS")]
    pub fasting_bs: i64,
    #[serde(rename = "RestingECG")]
    pub resting_ecg: String,
    #[serde(rename = "MaxHR")]
    pub max_hr: i64,
    #[serde(rename = "ExerciseAngina")]
    pub exercise_angina: String,
    #[serde(rename = "Oldpeak")]
    pub oldpeak: f64,
    #[serde(rename = "ST_Slope")]
    pub st_slope: String,
}

impl PatientRecord {
    /// Builds a record from a complete answer set.
    ///
    /// # Errors
    ///
    /// - `MissingField` if any key is absent
    /// - `InvalidFormat` if a value has the wrong type for its field
    pub fn from_answers(answers: &AnswerSet) -> Result<Self, ValidationError> {
        Ok(Self {
            age: integer(answers, FieldKey::Age)?,
            sex: category(answers, FieldKey::Sex)?,
            chest_pain_type: category(answers, FieldKey::ChestPainType)?,
            resting_bp: integer(answers, FieldKey::RestingBp)?,
            cholesterol: integer(answers, FieldKey::Cholesterol)?,
            fasting_bs: integer(answers, FieldKey::FastingBs)?,
            resting_ecg: category(answers, FieldKey::RestingEcg)?,
            max_hr: integer(answers, FieldKey::MaxHr)?,
            exercise_angina: category(answers, FieldKey::ExerciseAngina)?,
            oldpeak: real(answers, FieldKey::Oldpeak)?,
            st_slope: category(answers, FieldKey::StSlope)?,
        })
    }

    /// Fills gaps from the registry defaults, then builds the record.
    pub fn materialize(
        registry: &FieldRegistry,
        answers: &AnswerSet,
    ) -> Result<Self, ValidationError> {
        Self::from_answers(&registry.materialize_with_defaults(answers))
    }
}

fn require(answers: &AnswerSet, key: FieldKey) -> Result<&FieldValue, ValidationError> {
    answers
        .get(key)
        .ok_or_else(|| ValidationError::missing_field(key.as_str()))
}

fn integer(answers: &AnswerSet, key: FieldKey) -> Result<i64, ValidationError> {
    require(answers, key)?
        .as_i64()
        .ok_or_else(|| ValidationError::invalid_format(key.as_str(), "expected an integer"))
}

fn real(answers: &AnswerSet, key: FieldKey) -> Result<f64, ValidationError> {
    require(answers, key)?
        .as_f64()
        .ok_or_else(|| ValidationError::invalid_format(key.as_str(), "expected a number"))
}

fn category(answers: &AnswerSet, key: FieldKey) -> Result<String, ValidationError> {
    require(answers, key)?
        .as_category()
        .map(str::to_string)
        .ok_or_else(|| ValidationError::invalid_format(key.as_str(), "expected a label"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_the_fallback_record() {
        let record = PatientRecord::materialize(FieldRegistry::global(), &AnswerSet::new()).unwrap();
        assert_eq!(record.age, 50);
        assert_eq!(record.sex, "M");
        assert_eq!(record.chest_pain_type, "ASY");
        assert_eq!(record.fasting_bs, 0);
        assert_eq!(record.exercise_angina, "N");
        assert_eq!(record.oldpeak, 1.0);
        assert_eq!(record.st_slope, "Up");
    }

    #[test]
    fn serializes_with_column_names() {
        let record = PatientRecord::materialize(FieldRegistry::global(), &AnswerSet::new()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        for key in FieldKey::ALL {
            assert!(json.get(key.as_str()).is_some(), "missing column {}", key);
        }
        assert_eq!(json["RestingBP"], 120);
        assert_eq!(json["ST_Slope"], "Up");
    }

    #[test]
    fn oldpeak_accepts_integer_values() {
        let mut answers = FieldRegistry::global().defaults();
        answers.insert(FieldKey::Oldpeak, FieldValue::Integer(2));
        let record = PatientRecord::from_answers(&answers).unwrap();
        assert_eq!(record.oldpeak, 2.0);
    }

    #[test]
    fn missing_field_is_reported() {
        let answers: AnswerSet = FieldRegistry::global()
            .defaults()
            .iter()
            .filter(|(key, _)| *key != FieldKey::MaxHr)
            .map(|(key, value)| (key, value.clone()))
            .collect();

        let err = PatientRecord::from_answers(&answers).unwrap_err();
        assert_eq!(err, ValidationError::missing_field("MaxHR"));
    }

    #[test]
    fn wrong_type_is_reported() {
        let mut answers = FieldRegistry::global().defaults();
        answers.insert(FieldKey::Age, FieldValue::category("old"));

        let err = PatientRecord::from_answers(&answers).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "Age"));
    }
}
