// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, is_config_operation};
use mlb_standings::config::Config;
use mlb_standings::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Handle configuration operations first
    if args.list_config {
        return commands::handle_list_config_command().await;
    }

    if is_config_operation(&args) {
        return commands::handle_config_update_command(&args).await;
    }

    let config = Config::load().await?;

    let (log_file_path, _guard) =
        logging::setup_logging(&args, config.log_file_path.as_ref()).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    let repository = commands::build_repository(&config, &args)?;

    if let Some(team_name) = &args.set_favorite {
        return commands::handle_set_favorite_command(&repository, team_name).await;
    }

    if args.refresh {
        return commands::handle_refresh_command(&repository).await;
    }

    commands::handle_show_command(&repository, &args).await
}
