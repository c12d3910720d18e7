use crate::config::types::{Config, CrawlerConfig, TargetConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_target_config(&config.target)?;
    validate_crawler_config(&config.crawler)?;
    validate_specific_paths(&config.specific_paths)?;
    Ok(())
}

/// Validates the target server settings
fn validate_target_config(config: &TargetConfig) -> Result<(), ConfigError> {
    if config.host.trim().is_empty() {
        return Err(ConfigError::Validation("host cannot be empty".to_string()));
    }

    match config.port.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigError::Validation(format!(
            "port must be a number between 1 and 65535, got '{}'",
            config.port
        ))),
        Ok(_) => Ok(()),
    }
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.concurrent < 1 {
        return Err(ConfigError::Validation(format!(
            "concurrent must be >= 1, got {}",
            config.concurrent
        )));
    }

    if config.check_queue_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "check_queue_interval must be >= 1ms, got {}ms",
            config.check_queue_interval
        )));
    }

    for prefix in &config.reserved_prefixes {
        if prefix.is_empty() || prefix.contains('/') {
            return Err(ConfigError::Validation(format!(
                "reserved prefix must be a single non-empty path segment, got '{}'",
                prefix
            )));
        }
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the explicit path list
fn validate_specific_paths(paths: &[String]) -> Result<(), ConfigError> {
    for path in paths {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "specific path must start with '/', got '{}'",
                path
            )));
        }
    }
    Ok(())
}
