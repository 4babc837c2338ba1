//! Standings repository: fresh cache, else fetch with retry, else stale
//! cache, else a tagged failure.
//!
//! Remote fetches are single-flight. Callers that arrive while a fetch is
//! running wait for it and take its outcome instead of issuing their own.

use chrono::{DateTime, Datelike, Local};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::config::Config;
use crate::constants::{DEFAULT_FAVORITE_TEAM, DEFAULT_LEAGUE_IDS};
use crate::data_fetcher::api::{RetryConfig, RetryPolicy, StandingsSource};
use crate::data_fetcher::cache::{FavoriteTeam, KeyValueStore, StandingsCache};
use crate::data_fetcher::models::{DivisionRecord, StandingsSnapshot, TeamRecord};
use crate::data_fetcher::queries;
use crate::error::{AppError, FetchError, StandingsFailure};

/// Construction-time settings for [`StandingsRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOptions {
    pub league_ids: Vec<u32>,
    pub season: i32,
    pub retry: RetryConfig,
    pub default_favorite_team: String,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            league_ids: DEFAULT_LEAGUE_IDS.to_vec(),
            season: Local::now().year(),
            retry: RetryConfig::default(),
            default_favorite_team: DEFAULT_FAVORITE_TEAM.to_string(),
        }
    }
}

impl RepositoryOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            league_ids: config.league_ids.clone(),
            season: config.season.unwrap_or_else(|| Local::now().year()),
            retry: config.retry,
            default_favorite_team: config.default_favorite_team.clone(),
        }
    }
}

type FetchOutcome = Result<StandingsSnapshot, FetchError>;

pub struct StandingsRepository<C, S> {
    source: C,
    cache: StandingsCache<S>,
    favorite: FavoriteTeam<S>,
    retry: RetryPolicy,
    league_ids: Vec<u32>,
    season: i32,
    /// Held for the duration of a remote fetch; holds the last outcome.
    flight: Mutex<Option<FetchOutcome>>,
    completed_fetches: AtomicU64,
}

impl<C: StandingsSource, S: KeyValueStore> StandingsRepository<C, S> {
    pub fn new(source: C, store: Arc<S>, options: RepositoryOptions) -> Self {
        Self {
            source,
            cache: StandingsCache::new(store.clone()),
            favorite: FavoriteTeam::new(store, options.default_favorite_team),
            retry: RetryPolicy::from_config(&options.retry),
            league_ids: options.league_ids,
            season: options.season,
            flight: Mutex::new(None),
            completed_fetches: AtomicU64::new(0),
        }
    }

    pub fn league_ids(&self) -> &[u32] {
        &self.league_ids
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    /// Today's cached snapshot, a fresh one from the network, or, failing
    /// that, any older cached snapshot. Serving stale data is a success.
    #[instrument(skip(self))]
    pub async fn get_standings(&self) -> Result<StandingsSnapshot, StandingsFailure> {
        if let Some(snapshot) = self.read_fresh().await {
            return Ok(snapshot);
        }

        match self.fetch_single_flight().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => match self.cache.read_stale().await {
                Some(stale) => {
                    warn!("Fetch failed ({}), serving stale cached standings", e);
                    Ok(stale)
                }
                None => {
                    let failure = StandingsFailure::from(&e);
                    error!("Fetch failed with no cached fallback: {} ({})", e, failure);
                    Err(failure)
                }
            },
        }
    }

    /// The favorite team's record. `Ok(None)` when the team is not in the
    /// standings.
    pub async fn get_favorite_record(&self) -> Result<Option<TeamRecord>, StandingsFailure> {
        let favorite = self.favorite_team_or_default().await;
        let snapshot = self.get_standings().await?;
        Ok(queries::find_team(&snapshot, &favorite).cloned())
    }

    pub async fn get_top_teams(&self, count: usize) -> Result<Vec<TeamRecord>, StandingsFailure> {
        let snapshot = self.get_standings().await?;
        Ok(queries::top_teams(&snapshot, count))
    }

    /// Division slice for `team_name`; empty when no division contains it.
    pub async fn get_division_standings(
        &self,
        team_name: &str,
    ) -> Result<Vec<TeamRecord>, StandingsFailure> {
        let snapshot = self.get_standings().await?;
        Ok(queries::division_standings(&snapshot, team_name))
    }

    /// Like [`get_division_standings`](Self::get_division_standings), but keeps
    /// the division's league and id alongside the sorted teams.
    pub async fn get_division(
        &self,
        team_name: &str,
    ) -> Result<Option<DivisionRecord>, StandingsFailure> {
        let snapshot = self.get_standings().await?;
        Ok(queries::find_division(&snapshot, team_name))
    }

    pub async fn favorite_team(&self) -> Result<String, AppError> {
        self.favorite.get().await
    }

    pub async fn set_favorite_team(&self, team_name: &str) -> Result<(), AppError> {
        self.favorite.set(team_name).await
    }

    pub async fn last_update(&self) -> Result<Option<DateTime<Local>>, AppError> {
        self.cache.last_update().await
    }

    async fn favorite_team_or_default(&self) -> String {
        match self.favorite.get().await {
            Ok(name) => name,
            Err(e) => {
                warn!("Could not read favorite team, using default: {}", e);
                self.favorite.default_name().to_string()
            }
        }
    }

    async fn read_fresh(&self) -> Option<StandingsSnapshot> {
        match self.cache.read_if_fresh().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Ignoring unreadable cache: {}", e);
                None
            }
        }
    }

    async fn fetch_single_flight(&self) -> FetchOutcome {
        let seen = self.completed_fetches.load(Ordering::Acquire);
        let mut last_outcome = self.flight.lock().await;

        if self.completed_fetches.load(Ordering::Acquire) != seen
            && let Some(outcome) = last_outcome.as_ref()
        {
            debug!("Reusing outcome of a fetch that completed while waiting");
            return outcome.clone();
        }

        // A fetch may have completed between the caller's cache check and
        // `seen` being read
        if let Some(snapshot) = self.read_fresh().await {
            return Ok(snapshot);
        }

        let outcome = self.fetch_and_store().await;
        *last_outcome = Some(outcome.clone());
        self.completed_fetches.fetch_add(1, Ordering::Release);
        outcome
    }

    async fn fetch_and_store(&self) -> FetchOutcome {
        info!(
            "Fetching standings: leagues={:?}, season={}",
            self.league_ids, self.season
        );

        let snapshot = self
            .retry
            .run(|attempt| {
                debug!("Standings fetch attempt {}", attempt + 1);
                self.source.fetch(&self.league_ids, self.season)
            })
            .await?;

        // The fetched data is still good even if it could not be persisted
        if let Err(e) = self.cache.write(&snapshot).await {
            warn!("Failed to cache standings: {}", e);
        }

        Ok(snapshot)
    }
}
