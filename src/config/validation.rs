use crate::error::AppError;
use std::path::Path;

use super::Config;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API domain cannot be empty and must look like a URL or domain name
/// - At least one league id must be configured
/// - HTTP timeout must be positive
/// - Retry budget must allow at least one attempt
/// - If log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    let api_domain = &config.api_domain;
    if api_domain.is_empty() {
        return Err(AppError::config_error("API domain cannot be empty"));
    }

    if !api_domain.starts_with("http://")
        && !api_domain.starts_with("https://")
        && !api_domain.contains('.')
        && !api_domain.starts_with("localhost")
    {
        return Err(AppError::config_error(
            "API domain must be a valid URL or domain name",
        ));
    }

    if config.league_ids.is_empty() {
        return Err(AppError::config_error("At least one league id is required"));
    }

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error("HTTP timeout must be at least 1 second"));
    }

    if config.retry.max_attempts == 0 {
        return Err(AppError::config_error("Retry max_attempts must be at least 1"));
    }

    if config.default_favorite_team.trim().is_empty() {
        return Err(AppError::config_error("Default favorite team cannot be empty"));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
