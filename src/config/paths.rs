use std::path::Path;

use crate::constants::APP_DIR_NAME;

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
        .join("logs")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the persisted standings store.
///
/// # Notes
/// - Uses the platform data directory (e.g., ~/.local/share on Linux)
/// - Falls back to current directory if the data directory is unavailable
pub fn get_store_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
        .join("store.toml")
        .to_string_lossy()
        .to_string()
}
