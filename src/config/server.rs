//! HTTP listener configuration
//!
//! `CARDIO_INTAKE__SERVER__*` variables. Every field has a default, so a bare
//! environment binds `0.0.0.0:8080` in development mode.

use serde::{Deserialize, Deserializer};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

/// Accepted range for `request_timeout_secs`.
const REQUEST_TIMEOUT_SECS: std::ops::RangeInclusive<u64> = 1..=300;

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// IP address to bind
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Whole-request limit enforced by the router, in seconds
    pub request_timeout_secs: u64,
    /// Allowed CORS origins; empty allows any origin
    #[serde(deserialize_with = "comma_separated")]
    pub cors_origins: Vec<String>,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Environment {
    /// Production logs are JSON for the collector; everything else is pretty.
    pub fn log_format(self) -> LogFormat {
        match self {
            Environment::Production => LogFormat::Json,
            Environment::Development | Environment::Staging => LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    /// Address to bind; `host` must be a literal IP.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidSocketAddr(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !REQUEST_TIMEOUT_SECS.contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::default(),
            log_level: "info,cardio_intake=debug,tower_http=info".to_string(),
            request_timeout_secs: 30,
            cors_origins: Vec::new(),
        }
    }
}

/// Reads `"a, b,"` as `["a", "b"]`.
fn comma_separated<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from_json(value: serde_json::Value) -> ServerConfig {
        serde_json::from_value(value).unwrap()
    }

    mod loading {
        use super::*;

        #[test]
        fn missing_fields_take_defaults() {
            let config = from_json(json!({ "port": 9000 }));
            assert_eq!(config.port, 9000);
            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.request_timeout(), Duration::from_secs(30));
            assert!(config.cors_origins.is_empty());
        }

        #[test]
        fn cors_origins_split_on_commas() {
            let config = from_json(json!({
                "cors_origins": "http://localhost:5173, http://localhost:3000,"
            }));
            assert_eq!(
                config.cors_origins,
                vec!["http://localhost:5173", "http://localhost:3000"]
            );
        }

        #[test]
        fn environment_names_are_lowercase() {
            let config = from_json(json!({ "environment": "staging" }));
            assert_eq!(config.environment, Environment::Staging);
        }
    }

    mod binding {
        use super::*;

        #[test]
        fn literal_ip_binds() {
            let config = ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                ..Default::default()
            };
            assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
        }

        #[test]
        fn ipv6_host_binds() {
            let config = ServerConfig {
                host: "::1".to_string(),
                ..Default::default()
            };
            assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:8080");
        }

        #[test]
        fn hostname_is_rejected() {
            let config = ServerConfig {
                host: "not a host".to_string(),
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidSocketAddr("not a host".to_string()))
            );
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn defaults_are_valid() {
            assert!(ServerConfig::default().validate().is_ok());
        }

        #[test]
        fn port_zero_is_rejected() {
            let config = ServerConfig {
                port: 0,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
        }

        #[test]
        fn request_timeout_bounds() {
            for (secs, ok) in [(0, false), (1, true), (300, true), (301, false)] {
                let config = ServerConfig {
                    request_timeout_secs: secs,
                    ..Default::default()
                };
                assert_eq!(config.validate().is_ok(), ok, "{}s", secs);
            }
        }
    }

    #[test]
    fn only_production_logs_json() {
        assert_eq!(Environment::Production.log_format(), LogFormat::Json);
        assert_eq!(Environment::Staging.log_format(), LogFormat::Pretty);
        assert_eq!(Environment::Development.log_format(), LogFormat::Pretty);
    }
}
