use crate::errors::{ParleyError, ParleyResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: String,
    pub log_level: String,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080".to_string(),
            log_level: "info".to_string(),
            tick_rate_ms: 250,
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> ParleyResult<()> {
    let config_path = get_config_path()?;

    // If config exists, load it
    let mut config = if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| ParleyError::config_error(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&config_str)
            .map_err(|e| ParleyError::config_error(format!("Failed to parse config: {}", e)))?
    } else {
        // Create default config
        let config = Config::default();

        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            ParleyError::config_error(format!("Failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| ParleyError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, config_str)
            .map_err(|e| ParleyError::config_error(format!("Failed to write config file: {}", e)))?;

        config
    };

    // Env var wins over whatever the file says
    if let Ok(endpoint) = env::var("PARLEY_ENDPOINT") {
        config.endpoint = endpoint;
    }

    validate_config(&config)?;

    *CONFIG.write().unwrap() = config;

    Ok(())
}

fn get_config_path() -> ParleyResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ParleyError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("parley").join("config.json"))
}

fn validate_config(config: &Config) -> ParleyResult<()> {
    if config.endpoint.is_empty() {
        return Err(ParleyError::config_error("Endpoint is required"));
    }

    if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
        return Err(ParleyError::config_error(
            "Endpoint must be an http:// or https:// URL",
        ));
    }

    if config.log_level.is_empty() {
        return Err(ParleyError::config_error("Log level is required"));
    }

    if config.tick_rate_ms == 0 {
        return Err(ParleyError::config_error("tick_rate_ms must be greater than 0"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_empty_endpoint() {
        let mut config = Config::default();
        config.endpoint = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_endpoint_scheme() {
        let mut config = Config::default();
        config.endpoint = "ftp://example.com".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_tick_rate() {
        let mut config = Config::default();
        config.tick_rate_ms = 0;
        assert!(validate_config(&config).is_err());
    }
}
