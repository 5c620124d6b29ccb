//! Term explanations for "what is X" / "explain X" queries.

use once_cell::sync::Lazy;

static STANDARD: Lazy<Glossary> = Lazy::new(Glossary::standard);

/// One explainable term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub term: &'static str,
    pub explanation: &'static str,
}

/// Ordered term table with lookup by normalized (lower-cased) term.
#[derive(Debug, Clone)]
pub struct Glossary {
    entries: Vec<(String, GlossaryEntry)>,
}

impl Glossary {
    pub fn global() -> &'static Glossary {
        &STANDARD
    }

    pub fn standard() -> Self {
        Self::from_entries(vec![
            GlossaryEntry {
                term: "ATA",
                explanation: "Atypical Angina (ATA): chest pain that does not follow the classic pattern but may still indicate heart issues.",
            },
            GlossaryEntry {
                term: "NAP",
                explanation: "Non-Anginal Pain (NAP): chest pain not typical of heart disease.",
            },
            GlossaryEntry {
                term: "ASY",
                explanation: "Asymptomatic (ASY): no chest pain symptoms.",
            },
            GlossaryEntry {
                term: "TA",
                explanation: "Typical Angina (TA): classic chest pain with exertion, relieved by rest.",
            },
            GlossaryEntry {
                term: "ExerciseAngina",
                explanation: "Exercise Induced Angina: chest pain brought on by exercise.",
            },
            GlossaryEntry {
                term: "FastingBS",
                explanation: "Fasting Blood Sugar: above 120 mg/dl may signal diabetes.",
            },
            GlossaryEntry {
                term: "ChestPainType",
                explanation: "Types of Chest Pain: helps tell heart-related pain from other causes.",
            },
            GlossaryEntry {
                term: "Age",
                explanation: "Age: risk increases with age.",
            },
            GlossaryEntry {
                term: "Sex",
                explanation: "Biological Sex: men tend to develop heart disease earlier.",
            },
            GlossaryEntry {
                term: "RestingBP",
                explanation: "Resting Blood Pressure: normal is below 120/80 mmHg.",
            },
            GlossaryEntry {
                term: "Cholesterol",
                explanation: "Cholesterol: high levels clog arteries.",
            },
            GlossaryEntry {
                term: "RestingECG",
                explanation: "Resting ECG: the heart's electrical activity at rest.",
            },
            GlossaryEntry {
                term: "MaxHR",
                explanation: "Max Heart Rate: the highest rate reached during exercise.",
            },
            GlossaryEntry {
                term: "Oldpeak",
                explanation: "ST Depression: electrical changes during exercise.",
            },
            GlossaryEntry {
                term: "ST_Slope",
                explanation: "ST Segment Slope: an upward slope is usually better.",
            },
        ])
    }

    /// Builds a glossary; earlier entries win on duplicate terms.
    pub fn from_entries(entries: Vec<GlossaryEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.term.to_lowercase(), entry))
            .collect();
        Self { entries }
    }

    /// Looks up a bare term, ignoring case and surrounding whitespace.
    pub fn lookup(&self, term: &str) -> Option<&GlossaryEntry> {
        let wanted = term.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| *key == wanted)
            .map(|(_, entry)| entry)
    }

    /// Resolves "what is X" / "explain X" to an entry.
    ///
    /// Trailing `?`, `.` and `!` are ignored. Returns `None` when the input
    /// is not a query or names no known term.
    pub fn resolve_query(&self, input: &str) -> Option<&GlossaryEntry> {
        let normalized = input.trim().to_lowercase();
        let term = normalized
            .strip_prefix("what is ")
            .or_else(|| normalized.strip_prefix("explain "))?;
        self.lookup(term.trim().trim_end_matches(&['?', '.', '!'][..]))
    }
}

impl Default for Glossary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_what_is_queries() {
        let entry = Glossary::global().resolve_query("what is ATA").unwrap();
        assert_eq!(entry.term, "ATA");
    }

    #[test]
    fn resolves_explain_queries_case_insensitively() {
        let entry = Glossary::global().resolve_query("  Explain maxhr?  ").unwrap();
        assert_eq!(entry.term, "MaxHR");
    }

    #[test]
    fn short_term_does_not_match_longer_one() {
        let entry = Glossary::global().resolve_query("what is ta").unwrap();
        assert_eq!(entry.term, "TA");
        assert!(Glossary::global().resolve_query("what is at").is_none());
    }

    #[test]
    fn rejects_non_queries_and_unknown_terms() {
        assert!(Glossary::global().resolve_query("ATA").is_none());
        assert!(Glossary::global().resolve_query("what is love").is_none());
        assert!(Glossary::global().resolve_query("tell me about ATA").is_none());
    }

    #[test]
    fn first_declared_entry_wins_on_duplicates() {
        let glossary = Glossary::from_entries(vec![
            GlossaryEntry { term: "LVH", explanation: "first" },
            GlossaryEntry { term: "lvh", explanation: "second" },
        ]);
        assert_eq!(glossary.lookup("LVH").unwrap().explanation, "first");
    }

    #[test]
    fn every_field_has_an_entry() {
        use crate::domain::intake::field::FieldKey;
        for key in FieldKey::ALL {
            assert!(
                Glossary::global().lookup(key.as_str()).is_some(),
                "missing glossary entry for {}",
                key
            );
        }
    }
}
