//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::{ExecutionMode, ServerConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable selecting the execution mode.
pub const MODE_ENV_VAR: &str = "TRIMMER_ENV";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load, apply environment overrides, and validate a TOML config file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ServerConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    prepare(config)
}

/// Apply environment overrides to `config` and validate it.
pub fn prepare(mut config: ServerConfig) -> Result<ServerConfig, ConfigError> {
    apply_mode_override(&mut config, std::env::var(MODE_ENV_VAR).ok().as_deref());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// `TRIMMER_ENV`, when set, decides the execution mode.
pub fn apply_mode_override(config: &mut ServerConfig, env_value: Option<&str>) {
    if let Some(name) = env_value {
        config.trimmer.mode = ExecutionMode::from_env_name(name);
    }
}
