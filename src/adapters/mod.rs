//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API (axum)
//! - `prediction` - Risk classifier clients (model server, mock)
//! - `storage` - Session store implementations

pub mod http;
pub mod prediction;
pub mod storage;

pub use http::{app_router, IntakeAppState};
pub use prediction::{HttpPredictionService, HttpPredictorConfig, MockPredictionService};
pub use storage::InMemorySessionStore;
