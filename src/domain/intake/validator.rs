//! Raw-text answer validation.
//!
//! `validate` is a pure function of its arguments: the same key, text and
//! range always yield the same outcome.

use super::field::{FieldKey, FieldSpec, ValidRange};
use super::registry::FieldRegistry;
use super::value::FieldValue;

const AFFIRMATIVE: [&str; 5] = ["yes", "y", "1", "true", "positive"];
const NEGATIVE: [&str; 5] = ["no", "n", "0", "false", "negative"];
const UNKNOWN_MARKERS: [&str; 2] = ["unknown", "not sure"];

const SEX: &[(&str, &str)] = &[("m", "M"), ("male", "M"), ("f", "F"), ("female", "F")];
const CHEST_PAIN: &[(&str, &str)] = &[("ata", "ATA"), ("nap", "NAP"), ("asy", "ASY"), ("ta", "TA")];
const RESTING_ECG: &[(&str, &str)] = &[("normal", "Normal"), ("st", "ST"), ("lvh", "LVH")];
const ST_SLOPE: &[(&str, &str)] = &[("up", "Up"), ("flat", "Flat"), ("down", "Down")];

/// Result of validating one raw answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Typed value, absent when the answer was rejected.
    pub value: Option<FieldValue>,
    /// User-facing note: a retry hint on rejection, or a default notice.
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn accepted(value: FieldValue) -> Self {
        Self {
            value: Some(value),
            message: None,
        }
    }

    pub fn defaulted(value: FieldValue, message: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            message: Some(message.into()),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            value: None,
            message: Some(message.into()),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.value.is_some()
    }
}

/// Validates `raw` as an answer for `key`, checking `range` for numbers.
pub fn validate(key: FieldKey, raw: &str, range: Option<ValidRange>) -> ValidationOutcome {
    let normalized = raw.trim().to_lowercase();

    match key {
        FieldKey::FastingBs => validate_flag(
            key,
            &normalized,
            FieldValue::Integer(1),
            FieldValue::Integer(0),
        ),
        FieldKey::ExerciseAngina => validate_flag(
            key,
            &normalized,
            FieldValue::category("Y"),
            FieldValue::category("N"),
        ),
        FieldKey::Sex => validate_choice(&normalized, SEX, "Please enter 'M' or 'F'."),
        FieldKey::ChestPainType => {
            validate_choice(&normalized, CHEST_PAIN, "Enter one of ATA, NAP, ASY, TA.")
        }
        FieldKey::RestingEcg => {
            validate_choice(&normalized, RESTING_ECG, "Enter Normal, ST, or LVH.")
        }
        FieldKey::StSlope => validate_choice(&normalized, ST_SLOPE, "Enter Up, Flat, or Down."),
        FieldKey::Age | FieldKey::RestingBp | FieldKey::Cholesterol | FieldKey::MaxHr => {
            validate_number(key, &normalized, range, true)
        }
        FieldKey::Oldpeak => validate_number(key, &normalized, range, false),
    }
}

/// Validates against the field's own range.
pub fn validate_field(spec: &FieldSpec, raw: &str) -> ValidationOutcome {
    validate(spec.key, raw, spec.range)
}

fn mentions_unknown(normalized: &str) -> bool {
    UNKNOWN_MARKERS.iter().any(|marker| normalized.contains(marker))
}

/// Substitutes the registry default for an "unknown" / "not sure" answer.
fn fall_back(key: FieldKey, message: impl FnOnce(&FieldValue) -> String) -> ValidationOutcome {
    match FieldRegistry::global().default_for(key) {
        Some(fallback) => ValidationOutcome::defaulted(fallback.clone(), message(fallback)),
        None => ValidationOutcome::rejected("Invalid input format."),
    }
}

fn validate_flag(
    key: FieldKey,
    normalized: &str,
    yes: FieldValue,
    no: FieldValue,
) -> ValidationOutcome {
    if AFFIRMATIVE.contains(&normalized) {
        ValidationOutcome::accepted(yes)
    } else if NEGATIVE.contains(&normalized) {
        ValidationOutcome::accepted(no)
    } else if mentions_unknown(normalized) {
        fall_back(key, |fallback| format!("No worries! Using '{}' as default.", fallback))
    } else {
        ValidationOutcome::rejected("Please answer 'Yes', 'No' or 'unknown'.")
    }
}

fn validate_choice(
    normalized: &str,
    vocabulary: &[(&str, &str)],
    retry: &str,
) -> ValidationOutcome {
    vocabulary
        .iter()
        .find(|(token, _)| *token == normalized)
        .map(|(_, label)| ValidationOutcome::accepted(FieldValue::category(*label)))
        .unwrap_or_else(|| ValidationOutcome::rejected(retry))
}

fn validate_number(
    key: FieldKey,
    normalized: &str,
    range: Option<ValidRange>,
    whole: bool,
) -> ValidationOutcome {
    if mentions_unknown(normalized) {
        return fall_back(key, |fallback| format!("Using {} as default.", fallback));
    }

    let parsed = match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return ValidationOutcome::rejected("Invalid input format."),
    };

    if let Some(range) = range {
        if !range.contains(parsed) {
            return ValidationOutcome::rejected(format!(
                "Please enter a value between {} and {}.",
                range.min, range.max
            ));
        }
    }

    if whole {
        ValidationOutcome::accepted(FieldValue::Integer(parsed.trunc() as i64))
    } else {
        ValidationOutcome::accepted(FieldValue::Real(parsed))
    }
}
