//! Typed answer values and the per-session answer set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::field::FieldKey;

/// A validated answer: integer, real number, or categorical label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Real(f64),
    Category(String),
}

impl FieldValue {
    pub fn category(label: impl Into<String>) -> Self {
        Self::Category(label.into())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Integers widen to reals.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Real(v) => Some(*v),
            Self::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Category(label) => Some(label),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Real(v) if v.fract() == 0.0 => write!(f, "{:.1}", v),
            Self::Real(v) => write!(f, "{}", v),
            Self::Category(label) => f.write_str(label),
        }
    }
}

/// Answers collected so far, keyed by field.
///
/// Iteration follows registry order because `FieldKey` orders that way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<FieldKey, FieldValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.0.get(&key)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Records an answer, returning the value it replaced.
    pub fn insert(&mut self, key: FieldKey, value: FieldValue) -> Option<FieldValue> {
        self.0.insert(key, value)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

impl FromIterator<(FieldKey, FieldValue)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (FieldKey, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod field_value {
        use super::*;

        #[test]
        fn serializes_untagged() {
            assert_eq!(serde_json::to_string(&FieldValue::Integer(50)).unwrap(), "50");
            assert_eq!(serde_json::to_string(&FieldValue::Real(1.0)).unwrap(), "1.0");
            assert_eq!(
                serde_json::to_string(&FieldValue::category("ASY")).unwrap(),
                "\"ASY\""
            );
        }

        #[test]
        fn deserializes_by_json_shape() {
            let v: FieldValue = serde_json::from_str("120").unwrap();
            assert_eq!(v, FieldValue::Integer(120));
            let v: FieldValue = serde_json::from_str("2.5").unwrap();
            assert_eq!(v, FieldValue::Real(2.5));
            let v: FieldValue = serde_json::from_str("\"Flat\"").unwrap();
            assert_eq!(v, FieldValue::category("Flat"));
        }

        #[test]
        fn display_keeps_one_decimal_for_whole_reals() {
            assert_eq!(FieldValue::Real(1.0).to_string(), "1.0");
            assert_eq!(FieldValue::Real(2.3).to_string(), "2.3");
            assert_eq!(FieldValue::Integer(0).to_string(), "0");
            assert_eq!(FieldValue::category("N").to_string(), "N");
        }

        #[test]
        fn accessors_respect_variant() {
            assert_eq!(FieldValue::Integer(3).as_f64(), Some(3.0));
            assert_eq!(FieldValue::Real(3.5).as_i64(), None);
            assert_eq!(FieldValue::category("M").as_category(), Some("M"));
            assert_eq!(FieldValue::category("M").as_f64(), None);
        }
    }

    mod answer_set {
        use super::*;

        #[test]
        fn iterates_in_registry_order() {
            let mut answers = AnswerSet::new();
            answers.insert(FieldKey::StSlope, FieldValue::category("Up"));
            answers.insert(FieldKey::Age, FieldValue::Integer(40));
            answers.insert(FieldKey::Cholesterol, FieldValue::Integer(180));

            let keys: Vec<_> = answers.keys().collect();
            assert_eq!(
                keys,
                vec![FieldKey::Age, FieldKey::Cholesterol, FieldKey::StSlope]
            );
        }

        #[test]
        fn serializes_as_column_keyed_object() {
            let answers: AnswerSet = [
                (FieldKey::Age, FieldValue::Integer(61)),
                (FieldKey::Sex, FieldValue::category("F")),
            ]
            .into_iter()
            .collect();

            let json = serde_json::to_value(&answers).unwrap();
            assert_eq!(json, serde_json::json!({"Age": 61, "Sex": "F"}));
        }

        #[test]
        fn clear_empties_the_set() {
            let mut answers = AnswerSet::new();
            answers.insert(FieldKey::Age, FieldValue::Integer(40));
            answers.clear();
            assert!(answers.is_empty());
            assert!(!answers.contains(FieldKey::Age));
        }
    }
}
