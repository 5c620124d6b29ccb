//! Prediction Service Port - Interface for the risk classifier.
//!
//! The classifier is an opaque collaborator: it receives one complete
//! `PatientRecord` and answers with the probability of heart disease.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct Constant;
//!
//! #[async_trait]
//! impl PredictionService for Constant {
//!     async fn predict(&self, _record: &PatientRecord) -> Result<f64, PredictionError> {
//!         Ok(0.5)
//!     }
//!     fn service_info(&self) -> ServiceInfo {
//!         ServiceInfo::new("constant", "fixed")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::intake::{PatientRecord, SessionError};

/// Port for scoring a patient record.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Returns the probability of the positive class, in `[0, 1]`.
    async fn predict(&self, record: &PatientRecord) -> Result<f64, PredictionError>;

    /// Describes the backing classifier.
    fn service_info(&self) -> ServiceInfo;
}

/// Which classifier answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Adapter name (e.g., "http", "mock").
    pub name: String,
    /// Model identifier or endpoint.
    pub model: String,
}

impl ServiceInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Prediction errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    /// Model server is down or refused the request.
    #[error("prediction service unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Model server rejected the record.
    #[error("prediction rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status returned.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the model response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Model answered with something that is not a probability.
    #[error("invalid probability: {0}")]
    InvalidProbability(f64),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl PredictionError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a rejected error.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if retrying the same record might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PredictionError::Unavailable { .. }
                | PredictionError::Network(_)
                | PredictionError::Timeout { .. }
        )
    }
}

/// Checks that `value` is a finite probability.
pub fn ensure_probability(value: f64) -> Result<f64, PredictionError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(PredictionError::InvalidProbability(value))
    }
}

impl From<PredictionError> for SessionError {
    fn from(err: PredictionError) -> Self {
        SessionError::Prediction(err.to_string())
    }
}
