//! Configuration for end-to-end runs.
//!
//! Layers an optional YAML file and `FINERACT_`-prefixed environment
//! variables over the defaults.

use std::time::Duration;

use fineract_client::ClientConfig;
use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "FINERACT_E2E_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "FINERACT";
const DEFAULT_CONFIG_PATH: &str = "e2e.yaml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct E2eConfig {
    /// Platform API connection.
    pub api: ApiConfig,
    /// Business event verification.
    pub events: EventConfig,
}

/// API connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub tenant_id: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
    /// Accept self-signed certificates from local servers.
    pub accept_invalid_certs: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:8443/fineract-provider/api/v1".to_string(),
            tenant_id: "default".to_string(),
            username: None,
            password: None,
            timeout_secs: 30,
            accept_invalid_certs: false,
        }
    }
}

impl ApiConfig {
    pub fn to_client_config(&self) -> ClientConfig {
        let config = ClientConfig::default()
            .with_base_url(&self.base_url)
            .with_tenant(&self.tenant_id)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_accept_invalid_certs(self.accept_invalid_certs);

        match (&self.username, &self.password) {
            (Some(user), Some(password)) => config.with_credentials(user, password),
            _ => config,
        }
    }
}

/// Event verification settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// When false, event assertions pass without looking.
    pub enabled: bool,
    /// How long to wait for an expected event.
    pub wait_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            wait_ms: 5_000,
            poll_interval_ms: 100,
        }
    }
}

impl EventConfig {
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl E2eConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (later overrides earlier):
    /// 1. Defaults
    /// 2. YAML file named by `CONFIG_PATH_ENV` (default `e2e.yaml`, if it exists)
    /// 3. Environment variables with `CONFIG_ENV_PREFIX` prefix, e.g.
    ///    `FINERACT_API__BASE_URL` or `FINERACT_EVENTS__WAIT_MS`
    pub fn load() -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let config = ConfigLib::builder()
            .add_source(File::new(&config_path, FileFormat::Yaml).required(false))
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load configuration from a YAML file only.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, File, FileFormat};

        let config = ConfigLib::builder()
            .add_source(File::new(path, FileFormat::Yaml).required(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),
}
