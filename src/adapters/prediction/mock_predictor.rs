//! Mock Prediction Service for development and testing.
//!
//! # Features
//!
//! - Queued probabilities, consumed in order
//! - Default probability once the queue is empty
//! - Error injection
//! - Simulated latency
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let predictor = MockPredictionService::new()
//!     .with_probability(0.82)
//!     .with_error(PredictionError::unavailable("down"));
//!
//! assert_eq!(predictor.predict(&record).await?, 0.82);
//! assert!(predictor.predict(&record).await.is_err());
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::intake::PatientRecord;
use crate::ports::{ensure_probability, PredictionError, PredictionService, ServiceInfo};

/// Probability returned when nothing is queued.
pub const DEFAULT_MOCK_PROBABILITY: f64 = 0.25;

/// A configured mock response.
#[derive(Debug, Clone, PartialEq)]
pub enum MockPrediction {
    Probability(f64),
    Error(PredictionError),
}

/// Mock classifier.
#[derive(Debug, Clone)]
pub struct MockPredictionService {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockPrediction>>>,
    /// Returned once `responses` is exhausted.
    default_probability: f64,
    /// Simulated latency per request.
    delay: Duration,
    /// Records received, for verification.
    calls: Arc<Mutex<Vec<PatientRecord>>>,
}

impl Default for MockPredictionService {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockPredictionService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default_probability: DEFAULT_MOCK_PROBABILITY,
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a probability.
    pub fn with_probability(self, probability: f64) -> Self {
        lock(&self.responses).push_back(MockPrediction::Probability(probability));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: PredictionError) -> Self {
        lock(&self.responses).push_back(MockPrediction::Error(error));
        self
    }

    /// Sets the probability used when the queue is empty.
    pub fn with_default_probability(mut self, probability: f64) -> Self {
        self.default_probability = probability;
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<PatientRecord> {
        lock(&self.calls).clone()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn next_response(&self) -> MockPrediction {
        lock(&self.responses)
            .pop_front()
            .unwrap_or(MockPrediction::Probability(self.default_probability))
    }
}

#[async_trait]
impl PredictionService for MockPredictionService {
    async fn predict(&self, record: &PatientRecord) -> Result<f64, PredictionError> {
        lock(&self.calls).push(record.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockPrediction::Probability(p) => ensure_probability(p),
            MockPrediction::Error(err) => Err(err),
        }
    }

    fn service_info(&self) -> ServiceInfo {
        ServiceInfo::new("mock", "mock-classifier-1")
    }
}
