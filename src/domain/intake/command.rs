//! Free-text command interpretation.
//!
//! Control commands are checked before any answer validation, in this order:
//! help, restart, glossary query. Everything else is passed through as input
//! for the current phase.

use super::glossary::{Glossary, GlossaryEntry};

const HELP_TOKENS: [&str; 3] = ["help", "h", "?"];
const RESTART_TOKENS: [&str; 3] = ["restart", "reset", "start over"];
const SKIP_TOKENS: [&str; 3] = ["skip", "pass", "default"];
const START_WORDS: [&str; 10] = [
    "yes", "y", "yeah", "yep", "sure", "ok", "okay", "go", "start", "ready",
];

/// What one raw user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Restart,
    Explain(GlossaryEntry),
    /// Not a control command; handled by the current phase.
    Input(String),
}

impl Command {
    /// Classifies `raw` by command precedence.
    pub fn interpret(raw: &str, glossary: &Glossary) -> Self {
        let normalized = raw.trim().to_lowercase();

        if HELP_TOKENS.contains(&normalized.as_str()) {
            Command::Help
        } else if RESTART_TOKENS.contains(&normalized.as_str()) {
            Command::Restart
        } else if let Some(entry) = glossary.resolve_query(&normalized) {
            Command::Explain(*entry)
        } else {
            Command::Input(raw.trim().to_string())
        }
    }
}

/// True for "skip", "pass" or "default".
pub fn is_skip(raw: &str) -> bool {
    let normalized = raw.trim().to_lowercase();
    SKIP_TOKENS.contains(&normalized.as_str())
}

/// True when any word of `raw` is an affirmative start word ("let's go").
pub fn is_start_phrase(raw: &str) -> bool {
    raw.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .any(|word| START_WORDS.contains(&word))
}
