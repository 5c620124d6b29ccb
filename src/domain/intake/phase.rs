//! Conversation phases and their legal transitions.

use serde::{Deserialize, Serialize};

use super::field::FieldKey;
use crate::domain::foundation::StateMachine;

/// Where a conversation stands.
///
/// - `NotStarted`: waiting for the user to agree to begin
/// - `AwaitingField`: asking one question, in registry order
/// - `Complete`: every field answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "status", content = "field", rename_all = "snake_case")]
pub enum IntakePhase {
    #[default]
    NotStarted,
    AwaitingField(FieldKey),
    Complete,
}

impl IntakePhase {
    /// The field currently being asked, if any.
    pub fn awaiting(&self) -> Option<FieldKey> {
        match self {
            Self::AwaitingField(key) => Some(*key),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

fn successor(key: FieldKey) -> Option<FieldKey> {
    let index = FieldKey::ALL.iter().position(|k| *k == key)?;
    FieldKey::ALL.get(index + 1).copied()
}

impl StateMachine for IntakePhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use IntakePhase::*;
        match (self, target) {
            // Restart is always allowed
            (_, NotStarted) => true,
            (NotStarted, AwaitingField(first)) => Some(*first) == FieldKey::ALL.first().copied(),
            // One field at a time, never skipping ahead
            (AwaitingField(current), AwaitingField(next)) => successor(*current) == Some(*next),
            (AwaitingField(current), Complete) => successor(*current).is_none(),
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use IntakePhase::*;
        match self {
            NotStarted => FieldKey::ALL
                .first()
                .map(|first| vec![AwaitingField(*first), NotStarted])
                .unwrap_or_else(|| vec![NotStarted]),
            AwaitingField(current) => match successor(*current) {
                Some(next) => vec![AwaitingField(next), NotStarted],
                None => vec![Complete, NotStarted],
            },
            Complete => vec![NotStarted],
        }
    }
}
