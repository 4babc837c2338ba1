//! MLB standings data-access layer
//!
//! Fetches league standings from the MLB Stats API, keeps a same-day copy in
//! a persisted store, and derives the views a small scoreboard display needs:
//! the favorite team's record, the top teams and a division slice.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mlb_standings::data_fetcher::{
//!     FileStore, HttpStandingsClient, RepositoryOptions, StandingsRepository,
//! };
//! use mlb_standings::{AppError, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = HttpStandingsClient::from_config(&config)?;
//!     let store = Arc::new(FileStore::new(config.resolved_store_path()));
//!     let repository =
//!         StandingsRepository::new(client, store, RepositoryOptions::from_config(&config));
//!
//!     match repository.get_top_teams(5).await {
//!         Ok(teams) => {
//!             for team in teams {
//!                 println!("{} {}", team.team.name, team.record_text());
//!             }
//!         }
//!         Err(failure) => eprintln!("{}", failure.code()),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod display;
pub mod error;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::models::{StandingsSnapshot, TeamRecord};
pub use data_fetcher::{HttpStandingsClient, StandingsRepository};
pub use display::{DisplayMode, ErrorCode, team_abbreviation};
pub use error::{AppError, FetchError, StandingsFailure};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
