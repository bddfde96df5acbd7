//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ApiConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the store URL.
pub const ENV_STORE_URL: &str = "SUPABASE_URL";
/// Environment variable holding the store access key.
pub const ENV_STORE_KEY: &str = "SUPABASE_KEY";
/// Environment variable holding the listen port.
pub const ENV_PORT: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => write!(f, "Invalid value for {}: '{}'", var, value),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a configuration file without validating it.
pub fn read_config_file(path: &Path) -> Result<ApiConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay environment values on top of a configuration.
///
/// `lookup` abstracts `std::env::var` so the overlay can be tested without
/// touching the process environment.
pub fn apply_env_overrides<F>(config: &mut ApiConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_STORE_URL) {
        config.store.url = url;
    }
    if let Some(key) = lookup(ENV_STORE_KEY) {
        config.store.key = key;
    }
    if let Some(port) = lookup(ENV_PORT) {
        config.listener.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var: ENV_PORT, value: port.clone() })?;
    }
    Ok(())
}

/// Build the effective configuration: defaults, then the optional file, then
/// the process environment. The result is not yet validated so that callers
/// can apply command-line overrides first.
pub fn load_config(path: Option<&Path>) -> Result<ApiConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ApiConfig::default(),
    };
    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    Ok(config)
}

/// Run semantic validation, converting failures into a [`ConfigError`].
pub fn finalize(config: ApiConfig) -> Result<ApiConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
