//! Service configuration types.
//!
//! `ServiceConfig` represents the top-level `config.toml` that controls the
//! listen address, the public base URL used for webhook callbacks, the HTTP
//! module timeout, and the explanation service settings.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the blueprint runner.
///
/// Loaded from `~/.blueprint/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Public base URL used to build webhook callback URLs.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout applied to every outbound HTTP module call.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Generative text API settings.
    #[serde(default)]
    pub explain: ExplainConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: default_base_url(),
            http_timeout_secs: default_http_timeout_secs(),
            explain: ExplainConfig::default(),
        }
    }
}

/// Settings for the blueprint explanation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainConfig {
    /// Model used for `generateContent`.
    #[serde(default = "default_model")]
    pub model: String,

    /// API root (overridable for proxies and tests).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
        }
    }
}
