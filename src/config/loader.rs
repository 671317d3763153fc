//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::ValidationError;

/// Overrides `upstream.api_key`.
pub const ENV_API_KEY: &str = "NEWS_API_KEY";
/// Overrides `upstream.base_url`.
pub const ENV_BASE_URL: &str = "NEWS_API_BASE_URL";
/// Overrides `listener.bind_address`.
pub const ENV_BIND_ADDRESS: &str = "NEWS_RELAY_BIND";

/// Error type for configuration loading. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a configuration from a TOML file. Validation is left to the caller
/// so environment overrides can be applied first.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RelayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Apply environment overrides on top of a loaded configuration.
///
/// `lookup` is usually `|k| std::env::var(k).ok()`; empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = get(ENV_API_KEY) {
        config.upstream.api_key = key;
    }
    if let Some(base) = get(ENV_BASE_URL) {
        config.upstream.base_url = base;
    }
    if let Some(bind) = get(ENV_BIND_ADDRESS) {
        config.listener.bind_address = bind;
    }
}
