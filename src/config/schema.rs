//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::i18n::keys::AllowedKeys;

/// Root configuration for the trimmer server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Payload generation settings.
    pub trimmer: TrimmerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Whether compiled templates are cached between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Recompile every template on every request.
    #[default]
    Development,
    /// Cache compiled templates per worker.
    Production,
}

impl ExecutionMode {
    /// Interpret an environment name; only `production` enables caching.
    pub fn from_env_name(name: &str) -> Self {
        if name == "production" {
            ExecutionMode::Production
        } else {
            ExecutionMode::Development
        }
    }
}

/// Translation and template payload settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrimmerConfig {
    /// Path prefix in front of `/trimmer` (empty, or e.g. "/assets").
    pub mount_path: String,

    /// Root of the template tree.
    pub templates_path: PathBuf,

    /// Directory of translation files. No catalog is loaded when unset.
    pub locales_path: Option<PathBuf>,

    /// Locale filling gaps in every other locale.
    pub default_locale: String,

    /// Translation key prefixes clients may receive.
    pub allowed_keys: AllowedKeys,

    /// Caching mode; overridden by `TRIMMER_ENV`.
    pub mode: ExecutionMode,

    /// Variables available to every template render.
    pub renderer_scope: serde_json::Value,
}

impl Default for TrimmerConfig {
    fn default() -> Self {
        Self {
            mount_path: String::new(),
            templates_path: PathBuf::from("templates"),
            locales_path: None,
            default_locale: "en".to_string(),
            allowed_keys: AllowedKeys::All,
            mode: ExecutionMode::Development,
            renderer_scope: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
