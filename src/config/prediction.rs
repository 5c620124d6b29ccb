//! Prediction service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on `max_retries`.
pub const MAX_PREDICTION_RETRIES: u32 = 5;

/// Prediction service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionConfig {
    /// Which classifier backs the service
    #[serde(default)]
    pub provider: PredictionProvider,

    /// Scoring endpoint URL (required for `http`)
    pub endpoint: Option<String>,

    /// Bearer token for the model server
    pub api_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Probability returned by the mock classifier
    #[serde(default = "default_mock_probability")]
    pub mock_probability: f64,
}

/// Prediction provider type
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PredictionProvider {
    #[default]
    Mock,
    Http,
}

impl PredictionConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Longest a single prediction may take, retries and backoff included.
    ///
    /// Each attempt may use the full timeout; retry `n` is preceded by a
    /// `2^n` second backoff.
    pub fn budget(&self) -> Duration {
        let attempts = u64::from(self.max_retries).saturating_add(1);
        let backoff = 1u64
            .checked_shl(self.max_retries)
            .unwrap_or(u64::MAX)
            .saturating_sub(1);
        Duration::from_secs(
            self.timeout_secs
                .saturating_mul(attempts)
                .saturating_add(backoff),
        )
    }

    /// API key, if one is configured and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }

    /// Validate prediction configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidPredictionTimeout);
        }
        if self.max_retries > MAX_PREDICTION_RETRIES {
            return Err(ValidationError::InvalidRetryCount);
        }
        if !(0.0..=1.0).contains(&self.mock_probability) {
            return Err(ValidationError::InvalidMockProbability);
        }

        if self.provider == PredictionProvider::Http {
            let endpoint = self
                .endpoint
                .as_deref()
                .filter(|e| !e.is_empty())
                .ok_or(ValidationError::MissingRequired("PREDICTION__ENDPOINT"))?;
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidPredictionEndpoint);
            }
        }

        Ok(())
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            provider: PredictionProvider::default(),
            endpoint: None,
            api_key: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            mock_probability: default_mock_probability(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    1
}

fn default_mock_probability() -> f64 {
    0.25
}
