use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::core::provider::DEFAULT_FETCH_TIMEOUT;
use crate::core::rates::BASE_CURRENCY;
use crate::providers::exchangerate_api::DEFAULT_BASE_URL;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_millis() as u64
}

fn default_base_currency() -> String {
    BASE_CURRENCY.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExchangeRateApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ExchangeRateApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ExchangeRateApiConfig {
    fn default() -> Self {
        ExchangeRateApiConfig {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProvidersConfig {
    pub exchange_rate_api: Option<ExchangeRateApiConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchange_rate_api: Some(ExchangeRateApiConfig::default()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_currency: default_base_currency(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or defaults if none exists.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("app", "sparkl", "sparkl-rates")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// The live source settings, or `None` when the provider is switched off.
    pub fn exchange_rate_api(&self) -> Option<&ExchangeRateApiConfig> {
        self.providers.exchange_rate_api.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
base_currency: "NGN"
providers:
  exchange_rate_api:
    base_url: "http://example.com/rates"
    timeout_ms: 1500
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.base_currency, "NGN");
        let api = config.exchange_rate_api().expect("provider configured");
        assert_eq!(api.base_url, "http://example.com/rates");
        assert_eq!(api.timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_currency, "USD");
        let api = config.exchange_rate_api().unwrap();
        assert_eq!(api.base_url, "https://api.exchangerate-api.com");
        assert_eq!(api.timeout_ms, 5000);

        let partial: AppConfig = serde_yaml::from_str(
            r#"
providers:
  exchange_rate_api:
    base_url: "http://localhost:8080"
"#,
        )
        .unwrap();
        assert_eq!(partial.exchange_rate_api().unwrap().timeout_ms, 5000);
    }

    #[test]
    fn test_provider_can_be_disabled() {
        let config: AppConfig = serde_yaml::from_str(
            r#"
providers:
  exchange_rate_api: ~
"#,
        )
        .unwrap();
        assert!(config.exchange_rate_api().is_none());
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("nope.yaml"));
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }
}
