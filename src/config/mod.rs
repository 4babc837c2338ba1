use crate::constants::{
    DEFAULT_API_DOMAIN, DEFAULT_FAVORITE_TEAM, DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_LEAGUE_IDS,
    LOG_FILE_NAME,
};
use crate::data_fetcher::api::{RetryConfig, ensure_scheme};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path, get_store_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Stats API base URL. Should include https:// prefix.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Leagues requested from the standings endpoint (103 = AL, 104 = NL)
    #[serde(default = "default_league_ids")]
    pub league_ids: Vec<u32>,
    /// Season year. Current year when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<i32>,
    /// Favorite used until the user picks one
    #[serde(default = "default_favorite_team")]
    pub default_favorite_team: String,
    /// Location of the persisted standings store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<String>,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_api_domain() -> String {
    DEFAULT_API_DOMAIN.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_league_ids() -> Vec<u32> {
    DEFAULT_LEAGUE_IDS.to_vec()
}

fn default_favorite_team() -> String {
    DEFAULT_FAVORITE_TEAM.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: default_api_domain(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            league_ids: default_league_ids(),
            season: None,
            default_favorite_team: default_favorite_team(),
            store_path: None,
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Falls back to defaults when no config file exists.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `MLB_STANDINGS_API_DOMAIN` - Override API domain
    /// - `MLB_STANDINGS_LOG_FILE` - Override log file path
    /// - `MLB_STANDINGS_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(AppError)` - Unreadable file, invalid TOML or failed validation
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `MLB_STANDINGS_*` environment overrides in place.
    /// Unparseable timeout values are ignored. The API domain gets an
    /// `https://` prefix when it has no scheme.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_domain) = std::env::var("MLB_STANDINGS_API_DOMAIN") {
            self.api_domain = api_domain;
        }
        if !self.api_domain.is_empty() {
            self.api_domain = ensure_scheme(&self.api_domain);
        }

        if let Ok(log_file_path) = std::env::var("MLB_STANDINGS_LOG_FILE") {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var("MLB_STANDINGS_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Saves current configuration to the default config file location.
    ///
    /// # Notes
    /// - Creates config directory if it doesn't exist
    /// - Ensures api_domain has https:// prefix
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Store location: the configured `store_path`, or the platform data directory
    pub fn resolved_store_path(&self) -> String {
        self.store_path.clone().unwrap_or_else(get_store_path)
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Reports defaults when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();
        let file_exists = Path::new(&config_path).exists();
        let config = Config::load().await?;

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        if !file_exists {
            println!("(Not created yet, showing defaults)");
        }
        println!("────────────────────────────────────");
        println!("API Domain:");
        println!("{}", config.api_domain);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Leagues:");
        println!("{}", config.league_ids_param());
        println!("────────────────────────────────────");
        println!("Season:");
        match config.season {
            Some(season) => println!("{season}"),
            None => println!("Current year"),
        }
        println!("────────────────────────────────────");
        println!("Default Favorite Team:");
        println!("{}", config.default_favorite_team);
        println!("────────────────────────────────────");
        println!("Retry:");
        println!(
            "{} attempts, {} ms base delay",
            config.retry.max_attempts, config.retry.base_delay_ms
        );
        println!("────────────────────────────────────");
        println!("Store Location:");
        println!("{}", config.resolved_store_path());
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{LOG_FILE_NAME}");
            println!("(Default location)");
        }

        Ok(())
    }

    /// Comma separated league ids, as sent to the API
    pub fn league_ids_param(&self) -> String {
        self.league_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and ensures the API
    /// domain has the https:// prefix.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let api_domain = if !self.api_domain.starts_with("https://") {
            format!("https://{}", self.api_domain.trim_start_matches("http://"))
        } else {
            self.api_domain.clone()
        };
        let content = toml::to_string_pretty(&Config {
            api_domain,
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path. No env overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_domain = "https://api.example.com"
log_file_path = "/custom/log/path"
league_ids = [103]
season = 2024
default_favorite_team = "Seattle Mariners"

[retry]
max_attempts = 5
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_domain, "https://api.example.com");
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.league_ids, vec![103]);
        assert_eq!(config.season, Some(2024));
        assert_eq!(config.default_favorite_team, "Seattle Mariners");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay_ms, 2000);
    }

    #[tokio::test]
    async fn test_empty_file_yields_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("empty_config.toml");
        tokio::fs::write(&config_path, "").await.unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.api_domain, "https://statsapi.mlb.com");
        assert_eq!(config.league_ids, vec![103, 104]);
        assert_eq!(config.default_favorite_team, "New York Yankees");
        assert_eq!(config.http_timeout_seconds, 30);
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original_config = Config {
            log_file_path: Some("/custom/log/path".to_string()),
            season: Some(2025),
            store_path: Some("/tmp/store.toml".to_string()),
            ..Config::default()
        };

        original_config
            .save_to_path(&config_path_str)
            .await
            .unwrap();
        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(original_config, loaded_config);
    }

    #[tokio::test]
    async fn test_config_save_normalizes_api_domain() {
        let test_cases = vec![
            ("api.example.com", "https://api.example.com"),
            ("http://api.example.com", "https://api.example.com"),
            ("https://api.example.com", "https://api.example.com"),
            ("http://localhost:8080", "https://localhost:8080"),
        ];

        for (input, expected) in test_cases {
            let temp_dir = tempdir().unwrap();
            let config_path = temp_dir.path().join("config.toml");
            let config_path_str = config_path.to_string_lossy();

            let config = Config {
                api_domain: input.to_string(),
                ..Config::default()
            };
            config.save_to_path(&config_path_str).await.unwrap();

            let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
            assert_eq!(loaded_config.api_domain, expected, "input '{input}'");
        }
    }

    #[test]
    fn test_optional_fields_are_not_serialized_when_none() {
        let toml_string = toml::to_string_pretty(&Config::default()).unwrap();

        assert!(toml_string.contains("api_domain = \"https://statsapi.mlb.com\""));
        assert!(!toml_string.contains("log_file_path"));
        assert!(!toml_string.contains("season"));
        assert!(!toml_string.contains("store_path"));
        assert!(toml_string.contains("[retry]"));
    }

    #[tokio::test]
    async fn test_config_malformed_toml_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("malformed_config.toml");

        let malformed_content = r#"
api_domain = "https://api.example.com"
[invalid_section
malformed = "data
"#;
        tokio::fs::write(&config_path, malformed_content)
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[tokio::test]
    async fn test_config_load_from_nonexistent_path() {
        let result = Config::load_from_path("/nonexistent/path/config.toml").await;
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[test]
    fn test_paths_use_app_directory() {
        let config_path = Config::get_config_path();
        assert!(config_path.contains("mlb_standings"));
        assert!(config_path.ends_with("config.toml"));

        let log_dir_path = Config::get_log_dir_path();
        assert!(log_dir_path.contains("mlb_standings"));
        assert!(log_dir_path.ends_with("logs"));
    }

    #[test]
    fn test_resolved_store_path() {
        let config = Config::default();
        assert!(config.resolved_store_path().ends_with("store.toml"));

        let config = Config {
            store_path: Some("/tmp/custom.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolved_store_path(), "/tmp/custom.toml");
    }

    #[test]
    fn test_league_ids_param() {
        assert_eq!(Config::default().league_ids_param(), "103,104");
    }

    #[test]
    #[serial]
    fn test_environment_variable_override() {
        unsafe {
            std::env::set_var("MLB_STANDINGS_API_DOMAIN", "https://env.example.com");
            std::env::set_var("MLB_STANDINGS_LOG_FILE", "/env/log/path.log");
            std::env::set_var("MLB_STANDINGS_HTTP_TIMEOUT", "12");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var("MLB_STANDINGS_API_DOMAIN");
            std::env::remove_var("MLB_STANDINGS_LOG_FILE");
            std::env::remove_var("MLB_STANDINGS_HTTP_TIMEOUT");
        }

        assert_eq!(config.api_domain, "https://env.example.com");
        assert_eq!(config.log_file_path, Some("/env/log/path.log".to_string()));
        assert_eq!(config.http_timeout_seconds, 12);
    }

    #[test]
    #[serial]
    fn test_unparseable_timeout_override_is_ignored() {
        unsafe {
            std::env::set_var("MLB_STANDINGS_HTTP_TIMEOUT", "soon");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var("MLB_STANDINGS_HTTP_TIMEOUT");
        }

        assert_eq!(config.http_timeout_seconds, 30);
    }

    #[test]
    #[serial]
    fn test_domain_without_scheme_gets_https_prefix() {
        unsafe {
            std::env::set_var("MLB_STANDINGS_API_DOMAIN", "statsapi.mlb.com");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var("MLB_STANDINGS_API_DOMAIN");
        }

        assert_eq!(config.api_domain, "https://statsapi.mlb.com");

        let mut config = Config {
            api_domain: "http://127.0.0.1:39401".to_string(),
            ..Config::default()
        };
        config.apply_env_overrides();
        assert_eq!(config.api_domain, "http://127.0.0.1:39401");
    }
}
