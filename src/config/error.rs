//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid prediction endpoint URL")]
    InvalidPredictionEndpoint,

    #[error("Invalid prediction timeout")]
    InvalidPredictionTimeout,

    #[error("Prediction retries must be between 0 and 5")]
    InvalidRetryCount,

    #[error("Prediction budget of {budget_secs}s must be below the request timeout of {request_timeout_secs}s")]
    PredictionBudgetTooLong {
        budget_secs: u64,
        request_timeout_secs: u64,
    },

    #[error("Mock probability must be within [0, 1]")]
    InvalidMockProbability,

    #[error("Message length limit must be between 1 and 10000")]
    InvalidMessageLimit,

    #[error("Session time-to-live must be between 1 and 86400 seconds")]
    InvalidSessionTtl,
}
