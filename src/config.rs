//! Configuration management for runtime-probe
//!
//! Parses TOML configuration files and provides typed access to settings.
//! Every field has a default, so an empty file (or no file) yields a config
//! pointing at a runtime on `http://localhost:11434`.

use crate::error::{AppError, AppResult};
use crate::runtime::{ProbeTimeouts, RuntimeEndpoint};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound for either probe timeout, in seconds
pub const MAX_TIMEOUT_SECONDS: u64 = 60;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Runtime connection settings
///
/// Fields are private; values are checked by `Config::validate()` and read
/// through accessors.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_liveness_timeout")]
    liveness_timeout_seconds: u64,
    #[serde(default = "default_version_timeout")]
    version_timeout_seconds: u64,
}

impl RuntimeConfig {
    /// Create runtime settings with explicit values
    pub fn new(
        base_url: impl Into<String>,
        liveness_timeout_seconds: u64,
        version_timeout_seconds: u64,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            liveness_timeout_seconds,
            version_timeout_seconds,
        }
    }

    /// Get the configured base URL as written in the file
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn liveness_timeout_seconds(&self) -> u64 {
        self.liveness_timeout_seconds
    }

    pub fn version_timeout_seconds(&self) -> u64 {
        self.version_timeout_seconds
    }

    /// Build a validated endpoint from the configured base URL
    pub fn endpoint(&self) -> AppResult<RuntimeEndpoint> {
        RuntimeEndpoint::new(&self.base_url)
    }

    /// Probe timeouts derived from the configured seconds
    pub fn timeouts(&self) -> ProbeTimeouts {
        ProbeTimeouts::new(
            Duration::from_secs(self.liveness_timeout_seconds),
            Duration::from_secs(self.version_timeout_seconds),
        )
    }

    /// Replace the base URL (used by the `--base-url` CLI override)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            liveness_timeout_seconds: default_liveness_timeout(),
            version_timeout_seconds: default_version_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_liveness_timeout() -> u64 {
    5
}

fn default_version_timeout() -> u64 {
    2
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| {
            AppError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            }
        })?;

        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Validate configuration after parsing
    ///
    /// Called by `from_file()` and `from_str()`. Call it explicitly after
    /// building a `Config` by hand.
    pub fn validate(&self) -> AppResult<()> {
        self.runtime.endpoint()?;

        for (field, value) in [
            ("liveness_timeout_seconds", self.runtime.liveness_timeout_seconds),
            ("version_timeout_seconds", self.runtime.version_timeout_seconds),
        ] {
            if value == 0 || value > MAX_TIMEOUT_SECONDS {
                return Err(AppError::Config(format!(
                    "runtime.{} = {} is out of range. \
                    Timeouts must be between 1 and {} seconds.",
                    field, value, MAX_TIMEOUT_SECONDS
                )));
            }
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}
