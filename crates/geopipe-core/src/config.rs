use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{GeopipeError, Result};
use crate::models::SpatialReference;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered client configuration: defaults < config file < environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the processing backend API
    pub api_url: ConfigValue<String>,
    /// Timeout for backend requests in seconds
    pub request_timeout_secs: ConfigValue<u64>,
    /// Spatial reference new projects start with
    pub default_spatial_reference: ConfigValue<SpatialReference>,
}

impl ClientConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            api_url: ConfigValue::new(
                "http://localhost:3030/api".to_string(),
                ConfigSource::Default,
            ),
            request_timeout_secs: ConfigValue::new(30, ConfigSource::Default),
            default_spatial_reference: ConfigValue::new(
                SpatialReference::wgs84(),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeopipeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeopipeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(api_url) = file_config.api_url {
            self.api_url.update(api_url, ConfigSource::File);
        }

        if let Some(timeout) = file_config.request_timeout_secs {
            self.request_timeout_secs.update(timeout, ConfigSource::File);
        }

        if let Some(srs) = file_config.default_spatial_reference {
            let sref = srs.parse().map_err(|_| GeopipeError::ConfigInvalid {
                key: "default_spatial_reference".to_string(),
                reason: format!("'{}' is not an authority:code string", srs),
            })?;
            self.default_spatial_reference.update(sref, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOPIPE_API_URL
        if let Ok(api_url) = env::var("GEOPIPE_API_URL") {
            self.api_url.update(api_url, ConfigSource::Environment);
        }

        // GEOPIPE_TIMEOUT_SECS
        if let Ok(timeout_str) = env::var("GEOPIPE_TIMEOUT_SECS") {
            match timeout_str.parse::<u64>() {
                Ok(timeout) => {
                    self.request_timeout_secs.update(timeout, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid GEOPIPE_TIMEOUT_SECS value '{}': expected integer seconds",
                    timeout_str
                ),
            }
        }

        // GEOPIPE_DEFAULT_SRS
        if let Ok(srs_str) = env::var("GEOPIPE_DEFAULT_SRS") {
            match srs_str.parse::<SpatialReference>() {
                Ok(sref) => {
                    self.default_spatial_reference.update(sref, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid GEOPIPE_DEFAULT_SRS value '{}': expected authority:code",
                    srs_str
                ),
            }
        }

        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Raw shape of the TOML config file; every key optional.
#[derive(Debug, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    default_spatial_reference: Option<String>,
}
