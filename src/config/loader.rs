//! Configuration loading from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::schema::HostConfig;
use crate::config::validation::{validate_config, InvalidSetting};

/// Environment variable overriding `listener.port`.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid PORT value {0:?}: expected a port number")]
    Port(String),

    #[error("validation failed: {}", join_issues(.0))]
    Validation(Vec<InvalidSetting>),
}

fn join_issues(issues: &[InvalidSetting]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The config file was absent; built-in defaults (including the
    /// fallback admin credential) are in effect.
    Defaults,
}

/// Load and validate configuration from a JSON or TOML file.
///
/// The format is chosen by extension: `.json` is JSON, anything else TOML.
pub fn load_config(path: &Path) -> Result<HostConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(path, &content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Like [`load_config`], but a missing file yields the defaults.
///
/// Malformed content is still an error.
pub fn load_or_default(path: &Path) -> Result<(HostConfig, ConfigSource), ConfigError> {
    match load_config(path) {
        Ok(config) => Ok((config, ConfigSource::File)),
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            Ok((HostConfig::default(), ConfigSource::Defaults))
        }
        Err(e) => Err(e),
    }
}

fn parse_config(path: &Path, content: &str) -> Result<HostConfig, ConfigError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(content)?)
    } else {
        Ok(toml::from_str(content)?)
    }
}

/// Apply the `PORT` environment override to `config`.
pub fn apply_env_overrides(config: &mut HostConfig) -> Result<(), ConfigError> {
    if let Some(port) = parse_port_override(std::env::var(PORT_ENV).ok())? {
        config.listener.port = port;
    }
    Ok(())
}

/// Interpret a raw `PORT` value. Empty or absent means no override.
pub fn parse_port_override(raw: Option<String>) -> Result<Option<u16>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map(Some)
            .map_err(|_| ConfigError::Port(value)),
    }
}
