//! # Application Configuration
//!
//! Settings for reaching the Web API and for waiting on KAM loads. Values come
//! from four layers, highest precedence first:
//!
//! 1. **Command-line flags** (`--url`, `--poll-interval-ms`, ...)
//! 2. **Environment**: `OPENBEL_WS_URL` for the WSDL location
//! 3. **Config file**: optional TOML file passed with `--config`
//! 4. **Defaults**: `AppConfig::default()`
//!
//! Clap resolves layers 1 and 2 together, so [`ConfigOverrides`] already
//! carries the environment value when no flag was given.
//!
//! ```toml
//! wsdl_url = "http://localhost:8080/openbel-ws/belframework.wsdl"
//! request_timeout_secs = 60
//!
//! [poll]
//! interval_ms = 500
//! max_attempts = 0   # 0 = unbounded
//! timeout_secs = 600 # 0 = unbounded
//! ```

use anyhow::{Context, Result};
use openbel_ws_client::client::{ClientConfig, DEFAULT_REQUEST_TIMEOUT, DEFAULT_WSDL_URL};
use openbel_ws_client::loader::{DEFAULT_MAX_ELAPSED, DEFAULT_POLL_INTERVAL, LoadPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable holding the WSDL URL.
pub const URL_ENV: &str = "OPENBEL_WS_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub wsdl_url: String,
    /// SOAP endpoint, bypassing WSDL discovery when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    pub request_timeout_secs: u64,
    pub poll: PollConfig,
}

/// KAM load polling. Zero disables a bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PollConfig {
    pub interval_ms: u64,
    pub max_attempts: u32,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wsdl_url: DEFAULT_WSDL_URL.to_string(),
            service_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            poll: PollConfig::default(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            max_attempts: 0,
            timeout_secs: DEFAULT_MAX_ELAPSED.as_secs(),
        }
    }
}

/// Values given on the command line (or via the environment) that win over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub wsdl_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub poll_timeout_secs: Option<u64>,
    pub max_polls: Option<u32>,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Build the effective configuration from an optional file plus overrides.
    pub fn resolve(file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.wsdl_url {
            self.wsdl_url = url.clone();
        }
        if let Some(interval) = overrides.poll_interval_ms {
            self.poll.interval_ms = interval;
        }
        if let Some(timeout) = overrides.poll_timeout_secs {
            self.poll.timeout_secs = timeout;
        }
        if let Some(max) = overrides.max_polls {
            self.poll.max_attempts = max;
        }
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        let wsdl_url = Url::parse(&self.wsdl_url)
            .with_context(|| format!("Invalid WSDL URL '{}'", self.wsdl_url))?;
        let mut config = ClientConfig::new(wsdl_url)
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs));
        if let Some(service_url) = &self.service_url {
            let url = Url::parse(service_url)
                .with_context(|| format!("Invalid service URL '{service_url}'"))?;
            config = config.with_service_url(url);
        }
        Ok(config)
    }

    pub fn load_policy(&self) -> LoadPolicy {
        LoadPolicy::new()
            .with_interval(Duration::from_millis(self.poll.interval_ms))
            .with_max_attempts(non_zero(self.poll.max_attempts))
            .with_max_elapsed(non_zero(self.poll.timeout_secs).map(Duration::from_secs))
    }
}

fn non_zero<T: Default + PartialEq>(value: T) -> Option<T> {
    if value == T::default() {
        None
    } else {
        Some(value)
    }
}
