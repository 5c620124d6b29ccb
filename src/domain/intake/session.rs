//! Intake session aggregate.
//!
//! One user's conversation: the current `ConversationState` plus the
//! transcript that produced it. Sessions live only in memory.

use serde::{Deserialize, Serialize};

use super::engine::Turn;
use super::record::PatientRecord;
use super::state::ConversationState;
use super::transcript::TranscriptEntry;
use crate::domain::foundation::{SessionId, Timestamp};

/// Intake session.
///
/// # Invariants
///
/// - The transcript is append-only between restarts of the process
/// - `updated_at` moves forward on every applied turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeSession {
    id: SessionId,
    state: ConversationState,
    transcript: Vec<TranscriptEntry>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl IntakeSession {
    /// Opens a session in `NotStarted` with the greeting as first entry.
    pub fn start(id: SessionId, greeting: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            state: ConversationState::new(),
            transcript: vec![TranscriptEntry::bot(greeting)],
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Entries appended at or after `index`.
    pub fn transcript_since(&self, index: usize) -> &[TranscriptEntry] {
        self.transcript.get(index..).unwrap_or(&[])
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn record_user_message(&mut self, text: impl Into<String>) {
        self.transcript.push(TranscriptEntry::user(text));
        self.touch();
    }

    /// Adopts the turn's state and replies; returns the record to score, if any.
    pub fn apply_turn(&mut self, turn: Turn) -> Option<PatientRecord> {
        self.state = turn.state;
        self.transcript
            .extend(turn.replies.into_iter().map(TranscriptEntry::bot));
        self.touch();
        turn.completed
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
