//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Values that take precedence over the config file.
///
/// Populated from CLI flags and their `GATEWAY_*` environment variables.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub downstream_url: Option<String>,
    pub downstream_path: Option<String>,
    pub static_index: Option<String>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Apply every override that is set.
    pub fn apply(&self, config: &mut GatewayConfig) {
        if let Some(addr) = &self.bind_address {
            config.listener.bind_address = addr.clone();
        }
        if let Some(url) = &self.downstream_url {
            config.downstream.base_url = url.clone();
        }
        if let Some(path) = &self.downstream_path {
            config.downstream.path = path.clone();
        }
        if let Some(index) = &self.static_index {
            config.static_files.index_path = index.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Parse a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the effective configuration: file (or defaults), then overrides, then validation.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => GatewayConfig::default(),
    };
    overrides.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
