use crate::cli::Args;
use mlb_standings::config::Config;
use mlb_standings::data_fetcher::{
    FileStore, HttpStandingsClient, RepositoryOptions, StandingsRepository,
};
use mlb_standings::display::{PayloadOptions, is_known_club, payload_for_mode, render_payload};
use mlb_standings::error::AppError;
use std::io::stdout;
use std::sync::Arc;
use tracing::{info, warn};

pub type Repository = StandingsRepository<HttpStandingsClient, FileStore>;

/// Repository options from config, with `--league-ids` and `--season` applied.
pub fn repository_options(config: &Config, args: &Args) -> RepositoryOptions {
    let mut options = RepositoryOptions::from_config(config);
    if let Some(league_ids) = &args.league_ids {
        options.league_ids = league_ids.clone();
    }
    if let Some(season) = args.season {
        options.season = season;
    }
    options
}

/// Builds the HTTP backed repository over the persisted store.
pub fn build_repository(config: &Config, args: &Args) -> Result<Repository, AppError> {
    let client = HttpStandingsClient::from_config(config)?;
    let store = Arc::new(FileStore::new(config.resolved_store_path()));
    Ok(StandingsRepository::new(
        client,
        store,
        repository_options(config, args),
    ))
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_else(|e| {
        warn!("Could not load existing config, starting from defaults: {e}");
        Config::default()
    });

    if let Some(new_domain) = &args.new_api_domain {
        config.api_domain = new_domain.clone();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Handles the --set-favorite command.
///
/// Names outside the known club list are saved with a warning.
pub async fn handle_set_favorite_command(
    repository: &Repository,
    team_name: &str,
) -> Result<(), AppError> {
    let team_name = team_name.trim();
    if team_name.is_empty() {
        return Err(AppError::config_error("Favorite team name cannot be empty"));
    }

    if !is_known_club(team_name) {
        warn!("'{team_name}' is not a known club name");
        println!(
            "Warning: '{team_name}' is not a known club name and may not match any standings row."
        );
        println!("Expected a full name such as \"New York Yankees\".");
    }

    repository.set_favorite_team(team_name).await?;
    info!("Favorite team set to {team_name}");
    println!("Favorite team set to {team_name}");
    Ok(())
}

/// Handles the --refresh command.
///
/// Loads standings through the normal cache path and reports the outcome.
/// A failed refresh is reported with its code but is not a process error.
pub async fn handle_refresh_command(repository: &Repository) -> Result<(), AppError> {
    let leagues = repository
        .league_ids()
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    info!(
        "Refreshing standings for leagues {leagues}, season {}",
        repository.season()
    );

    match repository.get_standings().await {
        Ok(snapshot) => {
            let team_count = snapshot.teams().count();
            println!(
                "Standings ready for {}: {} divisions, {team_count} teams",
                repository.season(),
                snapshot.records.len()
            );
            if let Some(updated) = repository.last_update().await? {
                println!("Last updated {}", updated.format("%Y-%m-%d %H:%M"));
            }
        }
        Err(failure) => {
            warn!("Refresh failed: {}", failure.code());
            println!("Failed to refresh standings: {}", failure.code());
        }
    }
    Ok(())
}

/// Shows the screen selected with --mode.
pub async fn handle_show_command(repository: &Repository, args: &Args) -> Result<(), AppError> {
    let options = PayloadOptions {
        top_count: args.top_count,
        team: args.team.clone(),
    };
    let payload = payload_for_mode(repository, args.mode, &options).await;
    let last_update = repository.last_update().await.unwrap_or_else(|e| {
        warn!("Could not read last update time: {e}");
        None
    });

    render_payload(&mut stdout(), args.mode, &payload, last_update)
}
