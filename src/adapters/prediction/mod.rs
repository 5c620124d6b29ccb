//! Prediction Service Adapters.
//!
//! - `MockPredictionService` - Configurable mock for development and testing
//! - `HttpPredictionService` - Client for a model server over HTTP

mod http_predictor;
mod mock_predictor;

pub use http_predictor::{HttpPredictionService, HttpPredictorConfig};
pub use mock_predictor::{MockPrediction, MockPredictionService, DEFAULT_MOCK_PROBABILITY};
