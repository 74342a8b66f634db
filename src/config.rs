use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_HISTORY_FILE: &str = "prediction_history.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Optional settings file looked up in the working directory (any format the
/// `config` crate understands, e.g. `booking-predictor.toml`).
const CONFIG_FILE: &str = "booking-predictor";
const ENV_PREFIX: &str = "PREDICTOR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid prediction service URL {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("Request timeout must be at least one second")]
    ZeroTimeout,
}

/// Settings of the terminal client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the prediction service; endpoint paths are appended to it.
    pub api_url: String,
    /// File that holds the prediction history.
    pub history_file: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Defaults, then the optional settings file, then `PREDICTOR_*`
    /// environment variables (a `.env` file is honoured).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("history_file", DEFAULT_HISTORY_FILE)?
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(environment.try_parsing(true))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        tracing::debug!("Loaded configuration: {:?}", config);
        config.validate()
    }

    /// Apply command-line overrides on top of the loaded settings.
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        history_file: Option<PathBuf>,
        request_timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(history_file) = history_file {
            self.history_file = history_file;
        }
        if let Some(secs) = request_timeout_secs {
            self.request_timeout_secs = secs;
        }
        self.validate()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        let url = reqwest::Url::parse(&self.api_url).map_err(|e| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApiUrl {
                url: self.api_url.clone(),
                reason: format!("unsupported scheme {:?}", url.scheme()),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_environment(environment(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = ClientConfig::from_environment(environment(&[
            ("PREDICTOR_API_URL", "https://predictor.example.com"),
            ("PREDICTOR_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://predictor.example.com");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.history_file, PathBuf::from(DEFAULT_HISTORY_FILE));
    }

    #[test]
    fn test_command_line_overrides() {
        let config = ClientConfig::default()
            .with_overrides(
                Some("http://127.0.0.1:8080".to_string()),
                Some(PathBuf::from("/tmp/history.json")),
                None,
            )
            .unwrap();

        assert_eq!(config.api_url, "http://127.0.0.1:8080");
        assert_eq!(config.history_file, PathBuf::from("/tmp/history.json"));
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_url = ClientConfig::default().with_overrides(Some("localhost".to_string()), None, None);
        assert!(matches!(bad_url, Err(ConfigError::InvalidApiUrl { .. })));

        let bad_scheme =
            ClientConfig::default().with_overrides(Some("ftp://example.com".to_string()), None, None);
        assert!(matches!(bad_scheme, Err(ConfigError::InvalidApiUrl { .. })));

        let zero = ClientConfig::default().with_overrides(None, None, Some(0));
        assert!(matches!(zero, Err(ConfigError::ZeroTimeout)));
    }
}
