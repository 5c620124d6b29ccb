//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PredictionService` - The risk classifier collaborator
//! - `SessionStore` - Live intake sessions, keyed by `SessionId`

mod prediction_service;
mod session_store;

pub use prediction_service::{ensure_probability, PredictionError, PredictionService, ServiceInfo};
pub use session_store::{SessionStore, SessionStoreError};
