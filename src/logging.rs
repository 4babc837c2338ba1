use crate::cli::Args;
use mlb_standings::config::Config;
use mlb_standings::constants::LOG_FILE_NAME;
use mlb_standings::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_DIRECTIVE: &str = "mlb_standings=info";

fn env_filter() -> Result<EnvFilter, AppError> {
    let directive = DEFAULT_DIRECTIVE
        .parse()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Splits a log file path into its directory and file name, falling back
/// to the default directory and file name.
fn resolve_log_location(custom_log_path: Option<&String>) -> (String, String) {
    match custom_log_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path.parent().unwrap_or(Path::new("."));
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), LOG_FILE_NAME.to_string()),
    }
}

/// Sets up logging configuration for the application.
///
/// - Logs always go to a daily rolling file
/// - `--debug` also logs to stdout
/// - Creates log directory if it doesn't exist
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub async fn setup_logging(
    args: &Args,
    config_log_path: Option<&String>,
) -> Result<(String, WorkerGuard), AppError> {
    let custom_log_path = args.log_file.as_ref().or(config_log_path);
    let (log_dir, log_file_name) = resolve_log_location(custom_log_path);

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);

    // The guard must outlive every log call or buffered lines are lost
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_filter = env_filter()?;
    let stdout_layer = args.debug.then(|| {
        fmt::Layer::new()
            .with_writer(stdout)
            .with_ansi(true)
            .with_filter(stdout_filter)
    });

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(
            fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(env_filter()?),
        )
        .try_init()
        .map_err(|e| AppError::log_setup_error(e.to_string()))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}
