//! Test utilities: canned standings data and a scripted standings source.

use chrono::Local;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::data_fetcher::api::StandingsSource;
use crate::data_fetcher::cache::start_of_day;
use crate::data_fetcher::models::{
    Division, DivisionRecord, League, StandingsSnapshot, Streak, Team, TeamRecord,
};
use crate::error::FetchError;

/// Test utilities for creating mock standings data
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a team record with the given ranks; everything else is filler
    pub fn create_team_record(
        team_id: i32,
        name: &str,
        wins: i32,
        losses: i32,
        division_rank: &str,
        sport_rank: &str,
    ) -> TeamRecord {
        TeamRecord {
            team: Team {
                id: team_id,
                name: name.to_string(),
            },
            wins,
            losses,
            winning_percentage: format!(".{:03}", wins * 1000 / (wins + losses).max(1)),
            games_back: if division_rank == "1" {
                "-".to_string()
            } else {
                "5.0".to_string()
            },
            division_rank: division_rank.to_string(),
            league_rank: sport_rank.to_string(),
            sport_rank: sport_rank.to_string(),
            streak: Some(Streak {
                streak_type: "wins".to_string(),
                streak_number: 1,
                streak_code: "W1".to_string(),
            }),
            division_leader: division_rank == "1",
            wild_card_leader: false,
        }
    }

    /// Creates a division record
    pub fn create_division(
        league_id: i32,
        division_id: i32,
        division_name: &str,
        team_records: Vec<TeamRecord>,
    ) -> DivisionRecord {
        DivisionRecord {
            standings_type: "regularSeason".to_string(),
            league: League {
                id: league_id,
                name: None,
            },
            division: Division {
                id: division_id,
                name: Some(division_name.to_string()),
            },
            team_records,
        }
    }

    /// AL East (listed out of rank order) and NL West
    pub fn create_two_division_snapshot() -> StandingsSnapshot {
        StandingsSnapshot {
            records: vec![
                Self::create_division(
                    103,
                    201,
                    "American League East",
                    vec![
                        Self::create_team_record(139, "Tampa Bay Rays", 85, 77, "3", "9"),
                        Self::create_team_record(147, "New York Yankees", 94, 68, "1", "2"),
                        Self::create_team_record(110, "Baltimore Orioles", 70, 92, "4", "20"),
                        Self::create_team_record(111, "Boston Red Sox", 81, 81, "2", "12"),
                    ],
                ),
                Self::create_division(
                    104,
                    203,
                    "National League West",
                    vec![
                        Self::create_team_record(119, "Los Angeles Dodgers", 98, 64, "1", "1"),
                        Self::create_team_record(135, "San Diego Padres", 93, 69, "2", "4"),
                        Self::create_team_record(137, "San Francisco Giants", 80, 82, "3", "15"),
                    ],
                ),
            ],
        }
    }

    /// One division whose teams are named `Team 0`, `Team 1`, ... with the
    /// given sport ranks
    pub fn create_snapshot_with_sport_ranks(ranks: &[&str]) -> StandingsSnapshot {
        let teams = ranks
            .iter()
            .enumerate()
            .map(|(i, rank)| {
                Self::create_team_record(i as i32, &format!("Team {i}"), 80, 82, rank, rank)
            })
            .collect();

        StandingsSnapshot {
            records: vec![Self::create_division(103, 201, "Test Division", teams)],
        }
    }
}

/// Epoch millis of today's local midnight
pub fn today_midnight_ms() -> i64 {
    let now = Local::now();
    start_of_day(&now)
        .map(|start| start.timestamp_millis())
        .unwrap_or_else(|| now.timestamp_millis())
}

/// Epoch millis of noon-ish yesterday
pub fn yesterday_ms() -> i64 {
    today_midnight_ms() - 12 * 60 * 60 * 1000
}

/// `StandingsSource` that replays scripted outcomes in order.
///
/// Once the script is exhausted every call fails with a terminal error.
#[derive(Debug, Default)]
pub struct MockStandingsSource {
    responses: Mutex<VecDeque<Result<StandingsSnapshot, FetchError>>>,
    requests: Mutex<Vec<(Vec<u32>, i32)>>,
    delay: Option<Duration>,
}

impl MockStandingsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_ok(self, snapshot: StandingsSnapshot) -> Self {
        self.push(Ok(snapshot))
    }

    pub fn then_err(self, error: FetchError) -> Self {
        self.push(Err(error))
    }

    /// Simulated round-trip time applied to every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests().len()
    }

    pub fn requests(&self) -> Vec<(Vec<u32>, i32)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(self, outcome: Result<StandingsSnapshot, FetchError>) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
        self
    }
}

impl StandingsSource for MockStandingsSource {
    async fn fetch(&self, league_ids: &[u32], season: i32) -> Result<StandingsSnapshot, FetchError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((league_ids.to_vec(), season));
        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        next.unwrap_or_else(|| Err(FetchError::request("no scripted response", "mock://standings")))
    }
}
