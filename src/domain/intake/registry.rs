//! The fixed, ordered questionnaire.

use once_cell::sync::Lazy;

use super::field::{FieldKey, FieldKind, FieldSpec, ValidRange};
use super::value::{AnswerSet, FieldValue};

static STANDARD: Lazy<FieldRegistry> = Lazy::new(FieldRegistry::standard);

/// Ordered list of required fields with prompts, ranges and defaults.
///
/// # Invariants
///
/// - Every `FieldKey` appears exactly once.
/// - Fields are stored in `FieldKey` order, which is the question order.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FieldSpec>,
}

impl FieldRegistry {
    /// Shared instance, built on first use.
    pub fn global() -> &'static FieldRegistry {
        &STANDARD
    }

    /// Builds the eleven-field heart questionnaire.
    pub fn standard() -> Self {
        let fields = vec![
            FieldSpec {
                key: FieldKey::Age,
                prompt: "What's your age? (20-100)",
                label: "What's your age?",
                kind: FieldKind::Integer,
                range: Some(ValidRange::new(20.0, 100.0)),
                default_value: FieldValue::Integer(50),
            },
            FieldSpec {
                key: FieldKey::Sex,
                prompt: "What's your biological sex? ('M' or 'F')",
                label: "What's your biological sex?",
                kind: FieldKind::Choice,
                range: None,
                default_value: FieldValue::category("M"),
            },
            FieldSpec {
                key: FieldKey::ChestPainType,
                prompt: "Type of chest pain? (ATA, NAP, ASY, TA)\n(Type 'what is ATA' for details)",
                label: "Type of chest pain?",
                kind: FieldKind::Choice,
                range: None,
                default_value: FieldValue::category("ASY"),
            },
            FieldSpec {
                key: FieldKey::RestingBp,
                prompt: "Resting blood pressure? (90-200 mmHg, or 'unknown')",
                label: "Resting blood pressure?",
                kind: FieldKind::Integer,
                range: Some(ValidRange::new(90.0, 200.0)),
                default_value: FieldValue::Integer(120),
            },
            FieldSpec {
                key: FieldKey::Cholesterol,
                prompt: "Cholesterol level? (100-400 mg/dl, or 'unknown')",
                label: "Cholesterol level?",
                kind: FieldKind::Integer,
                range: Some(ValidRange::new(0.0, 600.0)),
                default_value: FieldValue::Integer(200),
            },
            FieldSpec {
                key: FieldKey::FastingBs,
                prompt: "Is fasting blood sugar >120 mg/dl? (Yes/No/unknown)",
                label: "Is fasting blood sugar >120 mg/dl?",
                kind: FieldKind::Flag,
                range: None,
                default_value: FieldValue::Integer(0),
            },
            FieldSpec {
                key: FieldKey::RestingEcg,
                prompt: "Resting ECG result? (Normal, ST, LVH)\n(Default is 'Normal')",
                label: "Resting ECG result?",
                kind: FieldKind::Choice,
                range: None,
                default_value: FieldValue::category("Normal"),
            },
            FieldSpec {
                key: FieldKey::MaxHr,
                prompt: "Maximum heart rate during exercise? (60-220 bpm; estimate 220-age if unknown)",
                label: "Maximum heart rate during exercise?",
                kind: FieldKind::Integer,
                range: Some(ValidRange::new(60.0, 220.0)),
                default_value: FieldValue::Integer(150),
            },
            FieldSpec {
                key: FieldKey::ExerciseAngina,
                prompt: "Exercise-induced angina? (Yes or No)",
                label: "Exercise-induced angina?",
                kind: FieldKind::Flag,
                range: None,
                default_value: FieldValue::category("N"),
            },
            FieldSpec {
                key: FieldKey::Oldpeak,
                prompt: "ST depression value? (0-6; 0 if unknown)",
                label: "ST depression value?",
                kind: FieldKind::Real,
                range: Some(ValidRange::new(0.0, 6.0)),
                default_value: FieldValue::Real(1.0),
            },
            FieldSpec {
                key: FieldKey::StSlope,
                prompt: "ST segment slope during exercise? (Up, Flat, Down)",
                label: "ST segment slope during exercise?",
                kind: FieldKind::Choice,
                range: None,
                default_value: FieldValue::category("Up"),
            },
        ];

        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.key == key)
    }

    /// 1-based position of `key` in the question sequence.
    pub fn question_number(&self, key: FieldKey) -> Option<usize> {
        self.fields
            .iter()
            .position(|spec| spec.key == key)
            .map(|index| index + 1)
    }

    pub fn default_for(&self, key: FieldKey) -> Option<&FieldValue> {
        self.get(key).map(|spec| &spec.default_value)
    }

    /// Key → fallback value for every field.
    pub fn defaults(&self) -> AnswerSet {
        self.fields
            .iter()
            .map(|spec| (spec.key, spec.default_value.clone()))
            .collect()
    }

    /// First field, in registry order, that has no answer yet.
    pub fn next_unanswered(&self, answers: &AnswerSet) -> Option<FieldKey> {
        self.fields
            .iter()
            .map(|spec| spec.key)
            .find(|key| !answers.contains(*key))
    }

    pub fn is_complete(&self, answers: &AnswerSet) -> bool {
        self.next_unanswered(answers).is_none()
    }

    /// Fills every field absent from `answers` with its registry default.
    ///
    /// Supplied answers are kept as-is; keys outside the registry are dropped.
    pub fn materialize_with_defaults(&self, answers: &AnswerSet) -> AnswerSet {
        self.fields
            .iter()
            .map(|spec| {
                let value = answers
                    .get(spec.key)
                    .cloned()
                    .unwrap_or_else(|| spec.default_value.clone());
                (spec.key, value)
            })
            .collect()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> &'static FieldRegistry {
        FieldRegistry::global()
    }

    mod shape {
        use super::*;

        #[test]
        fn holds_every_key_once_in_key_order() {
            let keys: Vec<_> = registry().fields().iter().map(|s| s.key).collect();
            assert_eq!(keys, FieldKey::ALL.to_vec());
        }

        #[test]
        fn question_numbers_are_one_based() {
            assert_eq!(registry().question_number(FieldKey::Age), Some(1));
            assert_eq!(registry().question_number(FieldKey::StSlope), Some(11));
        }

        #[test]
        fn ranged_fields_match_questionnaire() {
            let range = |k| registry().get(k).and_then(|s| s.range);
            assert_eq!(range(FieldKey::Age), Some(ValidRange::new(20.0, 100.0)));
            assert_eq!(range(FieldKey::RestingBp), Some(ValidRange::new(90.0, 200.0)));
            assert_eq!(range(FieldKey::Cholesterol), Some(ValidRange::new(0.0, 600.0)));
            assert_eq!(range(FieldKey::MaxHr), Some(ValidRange::new(60.0, 220.0)));
            assert_eq!(range(FieldKey::Oldpeak), Some(ValidRange::new(0.0, 6.0)));
            assert_eq!(range(FieldKey::Sex), None);
        }

        #[test]
        fn numeric_defaults_sit_inside_their_ranges() {
            for spec in registry().fields() {
                if let (Some(range), Some(v)) = (spec.range, spec.default_value.as_f64()) {
                    assert!(range.contains(v), "{} default {} outside range", spec.key, v);
                }
            }
        }
    }

    mod defaults {
        use super::*;

        #[test]
        fn default_values_match_documented_fallbacks() {
            let d = registry().defaults();
            assert_eq!(d.get(FieldKey::Age), Some(&FieldValue::Integer(50)));
            assert_eq!(d.get(FieldKey::Sex), Some(&FieldValue::category("M")));
            assert_eq!(d.get(FieldKey::ChestPainType), Some(&FieldValue::category("ASY")));
            assert_eq!(d.get(FieldKey::RestingBp), Some(&FieldValue::Integer(120)));
            assert_eq!(d.get(FieldKey::Cholesterol), Some(&FieldValue::Integer(200)));
            assert_eq!(d.get(FieldKey::FastingBs), Some(&FieldValue::Integer(0)));
            assert_eq!(d.get(FieldKey::RestingEcg), Some(&FieldValue::category("Normal")));
            assert_eq!(d.get(FieldKey::MaxHr), Some(&FieldValue::Integer(150)));
            assert_eq!(d.get(FieldKey::ExerciseAngina), Some(&FieldValue::category("N")));
            assert_eq!(d.get(FieldKey::Oldpeak), Some(&FieldValue::Real(1.0)));
            assert_eq!(d.get(FieldKey::StSlope), Some(&FieldValue::category("Up")));
            assert_eq!(d.len(), 11);
        }
    }

    mod progress {
        use super::*;

        #[test]
        fn next_unanswered_is_first_gap_in_order() {
            let mut answers = AnswerSet::new();
            assert_eq!(registry().next_unanswered(&answers), Some(FieldKey::Age));

            answers.insert(FieldKey::Age, FieldValue::Integer(44));
            answers.insert(FieldKey::ChestPainType, FieldValue::category("TA"));
            assert_eq!(registry().next_unanswered(&answers), Some(FieldKey::Sex));
        }

        #[test]
        fn complete_only_when_every_key_answered() {
            let mut answers = AnswerSet::new();
            for key in FieldKey::ALL {
                assert!(!registry().is_complete(&answers));
                answers.insert(key, registry().default_for(key).cloned().unwrap());
            }
            assert!(registry().is_complete(&answers));
        }
    }

    mod materialize {
        use super::*;

        #[test]
        fn fills_absent_keys_and_keeps_supplied_ones() {
            let mut answers = AnswerSet::new();
            answers.insert(FieldKey::Age, FieldValue::Integer(67));
            answers.insert(FieldKey::StSlope, FieldValue::category("Flat"));

            let full = registry().materialize_with_defaults(&answers);

            assert_eq!(full.len(), registry().len());
            assert_eq!(full.get(FieldKey::Age), Some(&FieldValue::Integer(67)));
            assert_eq!(full.get(FieldKey::StSlope), Some(&FieldValue::category("Flat")));
            assert_eq!(full.get(FieldKey::Sex), Some(&FieldValue::category("M")));
        }

        #[test]
        fn empty_answers_materialize_to_defaults() {
            let full = registry().materialize_with_defaults(&AnswerSet::new());
            assert_eq!(full, registry().defaults());
        }

        #[test]
        fn does_not_touch_the_input() {
            let answers = AnswerSet::new();
            let _ = registry().materialize_with_defaults(&answers);
            assert!(answers.is_empty());
        }
    }
}
