use crate::config::types::{Config, DiscoveryConfig, FetchConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_site(&config.site)?;

    if config.concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be >= 1, got {}",
            config.concurrency
        )));
    }

    validate_fetch_config(&config.fetch)?;
    validate_discovery_config(&config.discovery)?;
    Ok(())
}

/// Validates the target site
fn validate_site(site: &str) -> ConfigResult<()> {
    if site.trim().is_empty() {
        return Err(ConfigError::Validation(
            "target site cannot be empty".to_string(),
        ));
    }

    if site.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidUrl(format!(
            "target site '{}' contains whitespace",
            site
        )));
    }

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> ConfigResult<()> {
    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates discovery configuration
fn validate_discovery_config(config: &DiscoveryConfig) -> ConfigResult<()> {
    let url = Url::parse(&config.archive_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid archive_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "archive_url '{}' must use HTTP or HTTPS",
            config.archive_url
        )));
    }

    Ok(())
}
