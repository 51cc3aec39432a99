use crate::config::types::{Config, FetchConfig, ServerConfig};
use crate::ConfigError;
use std::net::SocketAddr;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "bind_address must be a socket address like 0.0.0.0:3002, got '{}': {}",
            config.bind_address, e
        ))
    })?;

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.browser_user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "browser_user_agent cannot be empty".to_string(),
        ));
    }

    if config.accept_language.trim().is_empty() {
        return Err(ConfigError::Validation(
            "accept_language cannot be empty".to_string(),
        ));
    }

    if config.fallback_max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "fallback_max_redirects must be <= 20, got {}",
            config.fallback_max_redirects
        )));
    }

    if !(1_000..=120_000).contains(&config.scrape_timeout_ms) {
        return Err(ConfigError::Validation(format!(
            "scrape_timeout_ms must be between 1000 and 120000, got {}ms",
            config.scrape_timeout_ms
        )));
    }

    Ok(())
}
