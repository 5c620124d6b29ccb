//! All-fields-at-once submission.
//!
//! Every supplied answer goes through the same validator as the chat.
//! Absent fields take registry defaults. One bad answer fails the whole
//! submission, with one issue per rejected field.

use std::collections::BTreeMap;
use std::str::FromStr;

use super::errors::FieldIssue;
use super::field::FieldKey;
use super::record::PatientRecord;
use super::registry::FieldRegistry;
use super::validator::validate_field;
use super::value::AnswerSet;

/// Validates raw answers keyed by column name and builds the full record.
pub fn quick_assessment(
    registry: &FieldRegistry,
    raw: &BTreeMap<String, String>,
) -> Result<PatientRecord, Vec<FieldIssue>> {
    let mut answers = AnswerSet::new();
    let mut issues = Vec::new();

    for (name, text) in raw {
        let spec = match FieldKey::from_str(name).ok().and_then(|key| registry.get(key)) {
            Some(spec) => spec,
            None => {
                issues.push(FieldIssue::new(name.as_str(), "Unknown field."));
                continue;
            }
        };

        let outcome = validate_field(spec, text);
        match outcome.value {
            Some(value) => {
                answers.insert(spec.key, value);
            }
            None => issues.push(FieldIssue::new(
                spec.key.as_str(),
                outcome
                    .message
                    .unwrap_or_else(|| "Invalid input format.".to_string()),
            )),
        }
    }

    if !issues.is_empty() {
        return Err(issues);
    }

    PatientRecord::materialize(registry, &answers)
        .map_err(|e| vec![FieldIssue::new("record", e.to_string())])
}
