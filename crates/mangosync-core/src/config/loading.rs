//! Configuration loading and validation logic.
//!
//! Configuration comes from at most one file: `~/.mangosync/config.toml`.
//! A missing file is not an error: the built-in defaults describe the
//! stock mangoapp/MangoHud setup. A present-but-invalid file is an error:
//! silently ignoring a broken config would hide misconfiguration from the
//! operator.

use crate::config::types::SyncConfig;
use crate::errors::ConfigError;
use std::fs;
use std::path::Path;

/// Check if an error is a "file not found" error.
fn is_file_not_found(e: &(dyn std::error::Error + 'static)) -> bool {
    if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
        return io_err.kind() == std::io::ErrorKind::NotFound;
    }

    let err_str = e.to_string();
    err_str.contains("No such file or directory") || err_str.contains("cannot find the path")
}

/// Load configuration from the user config file.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or if
/// validation fails. A missing config file is not an error.
pub fn load() -> Result<SyncConfig, Box<dyn std::error::Error>> {
    let config = match load_user_config() {
        Ok(config) => config,
        Err(e) if !is_file_not_found(e.as_ref()) => return Err(e),
        Err(_) => SyncConfig::default(), // File not found - use defaults
    };

    validate_config(&config)?;

    Ok(config)
}

/// Load the user configuration from ~/.mangosync/config.toml.
fn load_user_config() -> Result<SyncConfig, Box<dyn std::error::Error>> {
    let home_dir = dirs::home_dir().ok_or("Could not find home directory")?;
    let config_path = home_dir.join(".mangosync").join("config.toml");
    load_config_file(&config_path)
}

/// Load a configuration file from the given path.
fn load_config_file(path: &Path) -> Result<SyncConfig, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Config file not found at '{}'", path.display()),
        )));
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
    let config: SyncConfig = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(config)
}

/// Validate a configuration.
///
/// Rejects cadence values that would stall or spin the loop and empty
/// discovery identifiers that would match everything or nothing.
pub fn validate_config(config: &SyncConfig) -> Result<(), ConfigError> {
    if config.poll.slow_tick_divisor == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "slow_tick_divisor must be at least 1".to_string(),
        });
    }

    if config.poll.tick_interval_ms == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "tick_interval_ms must be at least 1".to_string(),
        });
    }

    if config.target.process_prefix.is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "target.process_prefix must not be empty".to_string(),
        });
    }

    if config.target.env_var.is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "target.env_var must not be empty".to_string(),
        });
    }

    Ok(())
}
