//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! - **InMemorySessionStore** - Sessions in a process-local map

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
