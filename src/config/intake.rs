//! Intake conversation configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Intake conversation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// Longest accepted user message, in characters
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    /// Idle time after which a session is discarded, in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
}

impl IntakeConfig {
    /// Session idle time-to-live as Duration
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// How often expired sessions are swept: a tenth of the TTL, at least
    /// one second.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs((self.session_ttl_secs / 10).max(1))
    }

    /// Validate intake configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_message_chars == 0 || self.max_message_chars > 10_000 {
            return Err(ValidationError::InvalidMessageLimit);
        }
        if self.session_ttl_secs == 0 || self.session_ttl_secs > 86_400 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        Ok(())
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_message_chars: default_max_message_chars(),
            session_ttl_secs: default_session_ttl(),
        }
    }
}

fn default_max_message_chars() -> usize {
    500
}

fn default_session_ttl() -> u64 {
    1800
}
