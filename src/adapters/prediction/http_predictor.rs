//! HTTP Predictor - PredictionService backed by a model server.
//!
//! POSTs the patient record as a JSON object keyed by column name and reads
//! the probability of the positive class from the response.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpPredictorConfig::new("http://model:54321/predict")
//!     .with_api_key("secret")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let predictor = HttpPredictionService::new(config)?;
//! ```
//!
//! # Response format
//!
//! `{"probability": 0.42}`; the model server's own `p1` column name is
//! accepted as an alias.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::intake::PatientRecord;
use crate::ports::{ensure_probability, PredictionError, PredictionService, ServiceInfo};

/// Configuration for the HTTP predictor.
#[derive(Debug, Clone)]
pub struct HttpPredictorConfig {
    /// Full URL of the scoring endpoint.
    pub endpoint: String,
    /// Optional bearer token.
    api_key: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl HttpPredictorConfig {
    /// Creates a configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
            max_retries: 1,
        }
    }

    /// Sets the bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

/// Model server response body.
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    #[serde(alias = "p1")]
    probability: f64,
}

/// Model server client.
pub struct HttpPredictionService {
    config: HttpPredictorConfig,
    client: Client,
}

impl HttpPredictionService {
    /// Creates a predictor with the given configuration.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the HTTP client cannot be built.
    pub fn new(config: HttpPredictorConfig) -> Result<Self, PredictionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PredictionError::unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn send_request(&self, record: &PatientRecord) -> Result<Response, PredictionError> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .json(record);

        if let Some(key) = self.config.api_key() {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                PredictionError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                PredictionError::unavailable(format!("Connection failed: {}", e))
            } else {
                PredictionError::network(e.to_string())
            }
        })
    }

    async fn parse_response(&self, response: Response) -> Result<f64, PredictionError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PredictionError::network(format!("Failed to read body: {}", e)))?;

        if !(200..300).contains(&status) {
            return Err(status_error(status, body));
        }

        parse_probability(&body)
    }

    async fn attempt(&self, record: &PatientRecord) -> Result<f64, PredictionError> {
        let response = self.send_request(record).await?;
        self.parse_response(response).await
    }
}

/// Exponential backoff before retry `n`: 1s, 2s, 4s, ...
fn backoff(retry_count: u32) -> Duration {
    Duration::from_secs(1u64 << retry_count.min(16))
}

fn status_error(status: u16, body: String) -> PredictionError {
    match status {
        500..=599 => PredictionError::unavailable(format!("Server error {}: {}", status, body)),
        _ => PredictionError::rejected(status, body),
    }
}

fn parse_probability(body: &str) -> Result<f64, PredictionError> {
    let parsed: PredictionResponse = serde_json::from_str(body)
        .map_err(|e| PredictionError::parse(format!("Failed to parse response: {}", e)))?;
    ensure_probability(parsed.probability)
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, record: &PatientRecord) -> Result<f64, PredictionError> {
        let mut retry_count = 0;

        loop {
            match self.attempt(record).await {
                Ok(probability) => return Ok(probability),
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    tracing::debug!(error = %err, retry_count, "retrying prediction");
                }
            }

            sleep(backoff(retry_count)).await;
            retry_count += 1;
        }
    }

    fn service_info(&self) -> ServiceInfo {
        ServiceInfo::new("http", self.config.endpoint.clone())
    }
}
