//! Runtime configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration. The generator API key may be omitted from the file
//! and supplied through `GOOGLE_API_KEY` instead.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::agent::{
    domain::{CapabilityName, Temperature},
    services::{CatalogSettings, DEFAULT_PROVIDER_NAME},
};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid TOML or holds invalid values.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value passed parsing but is not usable.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// No API key was configured or found in the environment.
    #[error("no generator API key configured; set generator.api_key or {API_KEY_ENV_VAR}")]
    MissingApiKey,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResearchConfig {
    /// Default log level, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Text-generation backend settings.
    pub generator: GeneratorConfig,
    /// Router settings.
    pub routing: RoutingConfig,
    /// Settings shared by the research agents.
    pub providers: ProvidersConfig,
    /// Passage retrieval settings.
    pub retrieval: RetrievalConfig,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            generator: GeneratorConfig::default(),
            routing: RoutingConfig::default(),
            providers: ProvidersConfig::default(),
            retrieval: RetrievalConfig::default(),
        }
    }
}

/// Gemini backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Model identifier.
    pub model: String,
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// API key; `GOOGLE_API_KEY` is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// HTTP request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-pro".to_owned(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_owned(),
            api_key: None,
            timeout_ms: 60_000,
        }
    }
}

impl GeneratorConfig {
    /// Resolves the API key from the config or `GOOGLE_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when neither source provides a
    /// non-empty key.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_api_key_from(|name| std::env::var(name).ok())
    }

    /// Resolves the API key, reading environment variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when neither source provides a
    /// non-empty key.
    pub fn resolve_api_key_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ConfigError> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| lookup(API_KEY_ENV_VAR).filter(|key| !key.trim().is_empty()))
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Router settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingConfig {
    /// Provider used when routing fails.
    pub default_provider: String,
    /// Sampling temperature for routing calls.
    pub temperature: Temperature,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_provider: DEFAULT_PROVIDER_NAME.to_owned(),
            temperature: Temperature::ROUTING,
        }
    }
}

impl RoutingConfig {
    /// Returns the validated fallback provider name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the name is blank, too long or
    /// contains control characters.
    pub fn default_provider_name(&self) -> Result<CapabilityName, ConfigError> {
        CapabilityName::new(self.default_provider.as_str()).map_err(|error| {
            ConfigError::Invalid {
                field: "routing.default_provider",
                reason: error.to_string(),
            }
        })
    }
}

/// Settings shared by the research agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvidersConfig {
    /// Sampling temperature for agent answers.
    pub temperature: Temperature,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            temperature: Temperature::CREATIVE,
        }
    }
}

/// Passage retrieval settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Passages retrieved per query.
    pub default_top_k: usize,
    /// Passages retrieved per query by the comparison agent.
    pub comparison_top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: 4,
            comparison_top_k: 6,
        }
    }
}

impl ResearchConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, or any
    /// error from [`ResearchConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        if config.generator.api_key.is_some() {
            warn!(
                path = %path.display(),
                "API key found in config file; prefer {API_KEY_ENV_VAR}"
            );
        }
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, unknown keys or
    /// out-of-range temperatures, and [`ConfigError::Invalid`] for values
    /// rejected by [`ResearchConfig::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that the type system does not enforce.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.routing.default_provider_name()?;
        if self.retrieval.default_top_k == 0 {
            return Err(ConfigError::Invalid {
                field: "retrieval.default_top_k",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.retrieval.comparison_top_k == 0 {
            return Err(ConfigError::Invalid {
                field: "retrieval.comparison_top_k",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.generator.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "generator.timeout_ms",
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(())
    }

    /// Returns the settings for the built-in agent catalog.
    #[must_use]
    pub const fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            temperature: self.providers.temperature,
            default_top_k: self.retrieval.default_top_k,
            comparison_top_k: self.retrieval.comparison_top_k,
        }
    }
}
