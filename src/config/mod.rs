//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `CARDIO_INTAKE` prefix
//! and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use cardio_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod intake;
mod prediction;
mod server;

pub use error::{ConfigError, ValidationError};
pub use intake::IntakeConfig;
pub use prediction::{PredictionConfig, PredictionProvider, MAX_PREDICTION_RETRIES};
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development setup backed by the mock classifier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Prediction service configuration (mock or model server)
    #[serde(default)]
    pub prediction: PredictionConfig,

    /// Conversation limits
    #[serde(default)]
    pub intake: IntakeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CARDIO_INTAKE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CARDIO_INTAKE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CARDIO_INTAKE__PREDICTION__ENDPOINT=...` -> `prediction.endpoint = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CARDIO_INTAKE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid, or
    /// if a prediction could outlast the request timeout.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.prediction.validate()?;
        self.intake.validate()?;

        let budget = self.prediction.budget();
        let request_timeout = self.server.request_timeout();
        if budget >= request_timeout {
            return Err(ValidationError::PredictionBudgetTooLong {
                budget_secs: budget.as_secs(),
                request_timeout_secs: request_timeout.as_secs(),
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
