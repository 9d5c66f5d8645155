//! Service configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.blueprint/` by default,
//! `$BLUEPRINT_HOME` when set) and deserializes it into [`ServiceConfig`].
//! Environment variables then override individual fields.

use std::path::{Path, PathBuf};

use blueprint_types::config::ServiceConfig;
use secrecy::SecretString;

/// Environment variables checked for the generative API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("could not determine a home directory; set BLUEPRINT_HOME")]
    NoHomeDir,
}

/// Resolve the data directory: `$BLUEPRINT_HOME` or `~/.blueprint`.
pub fn resolve_data_dir(env: impl Fn(&str) -> Option<String>) -> Result<PathBuf, ConfigError> {
    if let Some(home) = env("BLUEPRINT_HOME").filter(|h| !h.trim().is_empty()) {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir()
        .map(|home| home.join(".blueprint"))
        .ok_or(ConfigError::NoHomeDir)
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> ServiceConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
    };

    parse_or_default(&config_path, &content)
}

/// Load configuration from an explicitly named file.
///
/// Unlike [`load_config`], a missing file is an error: the caller asked for it.
pub async fn load_config_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                message: err.to_string(),
            });
        }
    };

    Ok(parse_or_default(path, &content))
}

fn parse_or_default(path: &Path, content: &str) -> ServiceConfig {
    match toml::from_str::<ServiceConfig>(content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServiceConfig::default()
        }
    }
}

/// Apply `BASE_URL`, `PORT` and `HOST` overrides.
///
/// An unparseable `PORT` is ignored with a warning.
pub fn apply_env_overrides(mut config: ServiceConfig, env: impl Fn(&str) -> Option<String>) -> ServiceConfig {
    if let Some(base_url) = env("BASE_URL").filter(|v| !v.trim().is_empty()) {
        config.base_url = base_url;
    }
    if let Some(host) = env("HOST").filter(|v| !v.trim().is_empty()) {
        config.host = host;
    }
    if let Some(port) = env("PORT") {
        match port.trim().parse::<u16>() {
            Ok(port) => config.port = port,
            Err(_) => tracing::warn!(value = port.as_str(), "Ignoring invalid PORT"),
        }
    }
    config
}

/// Look up the generative API key from the environment.
pub fn resolve_api_key(env: impl Fn(&str) -> Option<String>) -> Option<SecretString> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| env(*name))
        .find(|value| !value.trim().is_empty())
        .map(SecretString::from)
}

/// Reads a variable from the process environment, treating non-Unicode values as unset.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
