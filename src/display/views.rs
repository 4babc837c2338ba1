use std::fmt;

use clap::ValueEnum;
use tracing::{debug, error};

use super::abbreviations::{division_name, team_abbreviation};
use crate::data_fetcher::api::StandingsSource;
use crate::data_fetcher::cache::KeyValueStore;
use crate::data_fetcher::models::{DivisionRecord, TeamRecord};
use crate::data_fetcher::repository::StandingsRepository;
use crate::error::StandingsFailure;

/// Short status codes shown in place of data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Network,
    Timeout,
    Api,
    Unknown,
    /// Favorite team could not be read
    Config,
    /// Favorite team missing from the standings
    NotFound,
    /// No division contains the requested team
    NoDivision,
}

impl ErrorCode {
    pub fn code(self) -> &'static str {
        match self {
            ErrorCode::Network => "NET",
            ErrorCode::Timeout => "TMO",
            ErrorCode::Api => "API",
            ErrorCode::Unknown => "ERR",
            ErrorCode::Config => "CFG",
            ErrorCode::NotFound => "NFD",
            ErrorCode::NoDivision => "NOD",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl From<StandingsFailure> for ErrorCode {
    fn from(failure: StandingsFailure) -> Self {
        match failure {
            StandingsFailure::Network => ErrorCode::Network,
            StandingsFailure::Timeout => ErrorCode::Timeout,
            StandingsFailure::Api(_) => ErrorCode::Api,
            StandingsFailure::Unknown => ErrorCode::Unknown,
        }
    }
}

/// Screens cycled by the display toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DisplayMode {
    #[default]
    Favorite,
    Record,
    Division,
    #[value(name = "top")]
    TopTeams,
}

impl DisplayMode {
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Favorite => DisplayMode::Record,
            DisplayMode::Record => DisplayMode::Division,
            DisplayMode::Division => DisplayMode::TopTeams,
            DisplayMode::TopTeams => DisplayMode::Favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    pub abbreviation: String,
    pub wins: i32,
    pub losses: i32,
}

impl RecordView {
    pub fn from_record(record: &TeamRecord) -> Self {
        RecordView {
            abbreviation: team_abbreviation(&record.team.name),
            wins: record.wins,
            losses: record.losses,
        }
    }
}

/// Abbreviations in ranking order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingView {
    pub abbreviations: Vec<String>,
}

impl RankingView {
    pub fn from_records(records: &[TeamRecord]) -> Self {
        RankingView {
            abbreviations: records
                .iter()
                .map(|record| team_abbreviation(&record.team.name))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionRow {
    pub abbreviation: String,
    /// `"wins-losses"`
    pub record: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionView {
    /// Division label; the API name, else the name known for its id
    pub name: Option<String>,
    pub rows: Vec<DivisionRow>,
}

impl DivisionView {
    /// Builds the division slice, highlighting the row whose abbreviation
    /// matches `highlight_team`'s. Rows keep the order of `team_records`.
    pub fn from_division(division: &DivisionRecord, highlight_team: &str) -> Self {
        let highlight = team_abbreviation(highlight_team);
        DivisionView {
            name: division
                .division
                .name
                .clone()
                .or_else(|| division_name(division.division.id).map(str::to_string)),
            rows: division
                .team_records
                .iter()
                .map(|record| {
                    let abbreviation = team_abbreviation(&record.team.name);
                    DivisionRow {
                        highlighted: abbreviation == highlight,
                        record: record.record_text(),
                        abbreviation,
                    }
                })
                .collect(),
        }
    }

    /// `(abbreviation, "wins-losses")` pairs in division order
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.rows
            .iter()
            .map(|row| (row.abbreviation.clone(), row.record.clone()))
            .collect()
    }
}

/// Everything a renderer needs for one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayPayload {
    Favorite { abbreviation: String },
    Record(RecordView),
    Division(DivisionView),
    Ranking(RankingView),
    Error(ErrorCode),
}

/// Per-request knobs for [`payload_for_mode`]
#[derive(Debug, Clone, Default)]
pub struct PayloadOptions {
    pub top_count: usize,
    /// Division slice target; the favorite when absent
    pub team: Option<String>,
}

/// Resolves `mode` against the repository into a display payload.
///
/// Never fails: every failure becomes a [`DisplayPayload::Error`].
pub async fn payload_for_mode<C, S>(
    repository: &StandingsRepository<C, S>,
    mode: DisplayMode,
    options: &PayloadOptions,
) -> DisplayPayload
where
    C: StandingsSource,
    S: KeyValueStore,
{
    debug!("Building payload for {mode:?}");

    match mode {
        DisplayMode::Favorite => match repository.favorite_team().await {
            Ok(name) => DisplayPayload::Favorite {
                abbreviation: team_abbreviation(&name),
            },
            Err(e) => {
                error!("Failed to read favorite team: {e}");
                DisplayPayload::Error(ErrorCode::Config)
            }
        },
        DisplayMode::Record => match repository.get_favorite_record().await {
            Ok(Some(record)) => DisplayPayload::Record(RecordView::from_record(&record)),
            Ok(None) => DisplayPayload::Error(ErrorCode::NotFound),
            Err(failure) => failure_payload("team record", failure),
        },
        DisplayMode::Division => {
            let team = match &options.team {
                Some(team) => team.clone(),
                None => match repository.favorite_team().await {
                    Ok(name) => name,
                    Err(e) => {
                        error!("Failed to read favorite team: {e}");
                        return DisplayPayload::Error(ErrorCode::Config);
                    }
                },
            };

            match repository.get_division(&team).await {
                Ok(Some(division)) if !division.team_records.is_empty() => {
                    DisplayPayload::Division(DivisionView::from_division(&division, &team))
                }
                Ok(_) => DisplayPayload::Error(ErrorCode::NoDivision),
                Err(failure) => failure_payload("division standings", failure),
            }
        }
        DisplayMode::TopTeams => match repository.get_top_teams(options.top_count).await {
            Ok(records) => DisplayPayload::Ranking(RankingView::from_records(&records)),
            Err(failure) => failure_payload("top teams", failure),
        },
    }
}

fn failure_payload(what: &str, failure: StandingsFailure) -> DisplayPayload {
    error!("Failed to get {what}: {}", failure.code());
    DisplayPayload::Error(failure.into())
}
