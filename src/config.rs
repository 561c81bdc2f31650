// src/config.rs
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::errors::{PredictError, Result};

const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Where the remote prediction service lives.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PredictionServiceConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

/// Bind address of the gateway's own HTTP server.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Idle time after which a form session is dropped.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl ServerConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

/// High-level application configuration, loaded from the environment or a TOML file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub prediction: PredictionServiceConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_session_ttl_secs() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

impl Default for PredictionServiceConfig {
    fn default() -> Self {
        Self { api_base: default_api_base() }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a TOML file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base = lookup("PREDICTION_API_BASE").unwrap_or_else(default_api_base);
        let host = lookup("SERVER_HOST").unwrap_or_else(default_host);
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                PredictError::Config(format!("SERVER_PORT must be a port number, got '{}'", raw))
            })?,
            None => default_port(),
        };
        let session_ttl_secs = match lookup("SESSION_TTL_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                PredictError::Config(format!("SESSION_TTL_SECS must be a number of seconds, got '{}'", raw))
            })?,
            None => default_session_ttl_secs(),
        };

        let config = AppConfig {
            prediction: PredictionServiceConfig { api_base },
            server: ServerConfig { host, port, session_ttl_secs },
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.prediction.api_base.trim().is_empty() {
            return Err(PredictError::Config(
                "Prediction service address is empty. Please set PREDICTION_API_BASE.".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_env_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.prediction.api_base, "http://127.0.0.1:5000");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.session_ttl(), Duration::from_secs(1800));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PREDICTION_API_BASE", "http://ml.internal:9000/"),
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "3000"),
            ("SESSION_TTL_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.prediction.api_base, "http://ml.internal:9000/");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.session_ttl_secs, 60);
    }

    #[test]
    fn test_bad_port_and_empty_base_are_rejected() {
        let bad_port = AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "eighty")]));
        assert!(matches!(bad_port, Err(PredictError::Config(_))));

        let empty_base = AppConfig::from_lookup(lookup_from(&[("PREDICTION_API_BASE", " ")]));
        assert!(matches!(empty_base, Err(PredictError::Config(_))));

        let bad_ttl = AppConfig::from_lookup(lookup_from(&[("SESSION_TTL_SECS", "-5")]));
        assert!(matches!(bad_ttl, Err(PredictError::Config(_))));
    }

    #[test]
    fn test_toml_partial_file() {
        let config = AppConfig::from_toml_str(
            r#"
            [prediction]
            api_base = "https://predict.example.org"
            "#,
        )
        .unwrap();

        assert_eq!(config.prediction.api_base, "https://predict.example.org");
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_toml_syntax_error() {
        let result = AppConfig::from_toml_str("[server\nport = 1");
        assert!(matches!(result, Err(PredictError::TomlParse(_))));
    }
}
