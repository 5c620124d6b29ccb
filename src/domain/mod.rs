//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machines)
//! - `intake` - Questionnaire registry, validation and conversation state

pub mod foundation;
pub mod intake;
