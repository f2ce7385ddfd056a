//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that referenced directories exist
//! - Validate value ranges and locale tags
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::i18n::keys::AllowedKeys;
use crate::i18n::locale::validate_locale;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("trimmer.templates_path {} is not a directory", .0.display())]
    MissingTemplatesDir(PathBuf),

    #[error("trimmer.locales_path {} is not a directory", .0.display())]
    MissingLocalesDir(PathBuf),

    #[error("trimmer.default_locale {0:?} is not a valid locale")]
    InvalidDefaultLocale(String),

    #[error("trimmer.allowed_keys entry {0} is empty")]
    EmptyAllowedKey(usize),

    #[error("trimmer.mount_path {0:?} must be empty or start with '/' and not end with '/'")]
    InvalidMountPath(String),

    #[error("trimmer.renderer_scope must be a table")]
    RendererScopeNotTable,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let trimmer = &config.trimmer;

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.listener.bind_address.clone()));
    }

    if !trimmer.templates_path.is_dir() {
        errors.push(ValidationError::MissingTemplatesDir(trimmer.templates_path.clone()));
    }

    if let Some(locales) = &trimmer.locales_path {
        if !locales.is_dir() {
            errors.push(ValidationError::MissingLocalesDir(locales.clone()));
        }
    }

    if trimmer.default_locale.is_empty() || validate_locale(Some(&trimmer.default_locale)).is_err() {
        errors.push(ValidationError::InvalidDefaultLocale(trimmer.default_locale.clone()));
    }

    if let AllowedKeys::Prefixes(prefixes) = &trimmer.allowed_keys {
        for (i, prefix) in prefixes.iter().enumerate() {
            if prefix.is_empty() {
                errors.push(ValidationError::EmptyAllowedKey(i));
            }
        }
    }

    let mount = &trimmer.mount_path;
    if !mount.is_empty() && (!mount.starts_with('/') || mount.ends_with('/')) {
        errors.push(ValidationError::InvalidMountPath(mount.clone()));
    }

    if !trimmer.renderer_scope.is_object() {
        errors.push(ValidationError::RendererScopeNotTable);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
