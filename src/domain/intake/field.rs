//! Field identifiers and per-field metadata.
//!
//! `FieldKey` variants are declared in questionnaire order, so the derived
//! `Ord` is the registry order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::value::FieldValue;

/// One of the eleven clinical fields collected by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldKey {
    #[serde(rename = "Age")]
    Age,
    #[serde(rename = "Sex")]
    Sex,
    #[serde(rename = "ChestPainType")]
    ChestPainType,
    #[serde(rename = "RestingBP")]
    RestingBp,
    #[serde(rename = "Cholesterol")]
    Cholesterol,
    #[serde(rename = "FastingBS")]
    FastingBs,
    #[serde(rename = "RestingECG")]
    RestingEcg,
    #[serde(rename = "MaxHR")]
    MaxHr,
    #[serde(rename = "ExerciseAngina")]
    ExerciseAngina,
    #[serde(rename = "Oldpeak")]
    Oldpeak,
    #[serde(rename = "ST_Slope")]
    StSlope,
}

impl FieldKey {
    /// All keys in questionnaire order.
    pub const ALL: [FieldKey; 11] = [
        FieldKey::Age,
        FieldKey::Sex,
        FieldKey::ChestPainType,
        FieldKey::RestingBp,
        FieldKey::Cholesterol,
        FieldKey::FastingBs,
        FieldKey::RestingEcg,
        FieldKey::MaxHr,
        FieldKey::ExerciseAngina,
        FieldKey::Oldpeak,
        FieldKey::StSlope,
    ];

    /// Column name used by the classifier and the wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::ChestPainType => "ChestPainType",
            Self::RestingBp => "RestingBP",
            Self::Cholesterol => "Cholesterol",
            Self::FastingBs => "FastingBS",
            Self::RestingEcg => "RestingECG",
            Self::MaxHr => "MaxHR",
            Self::ExerciseAngina => "ExerciseAngina",
            Self::Oldpeak => "Oldpeak",
            Self::StSlope => "ST_Slope",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FieldKey {
    type Err = UnknownField;

    /// Matches column names case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// How a field's raw answers are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Yes/no question stored as a coded value.
    Flag,
    /// One label out of a fixed vocabulary.
    Choice,
    /// Whole number; fractional input is truncated.
    Integer,
    /// Real number.
    Real,
}

/// Inclusive numeric bounds for a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidRange {
    pub min: f64,
    pub max: f64,
}

impl ValidRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Immutable description of one questionnaire field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub key: FieldKey,
    /// Full chat prompt, including answer hints.
    pub prompt: &'static str,
    /// Short label for form front-ends.
    pub label: &'static str,
    pub kind: FieldKind,
    pub range: Option<ValidRange>,
    pub default_value: FieldValue,
}
