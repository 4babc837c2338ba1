//! Read-only projections over a standings snapshot.
//!
//! Team matching is exact display-name equality. "Not found" is an empty
//! or `None` result, never an error.

use crate::constants::RANK_FALLBACK;
use crate::data_fetcher::models::{DivisionRecord, StandingsSnapshot, TeamRecord};

/// Sort key for rank text. Anything that is not an integer sorts after every
/// valid rank.
pub fn rank_ordinal(rank: &str) -> i32 {
    rank.parse::<i32>().unwrap_or(RANK_FALLBACK)
}

/// The record whose team display name is exactly `team_name`.
pub fn find_team<'a>(snapshot: &'a StandingsSnapshot, team_name: &str) -> Option<&'a TeamRecord> {
    snapshot.teams().find(|record| record.team.name == team_name)
}

/// First `count` teams league-wide by sport rank. Equal ranks keep response order.
pub fn top_teams(snapshot: &StandingsSnapshot, count: usize) -> Vec<TeamRecord> {
    let mut teams: Vec<&TeamRecord> = snapshot.teams().collect();
    // sort_by_key is stable
    teams.sort_by_key(|record| rank_ordinal(&record.sport_rank));
    teams.into_iter().take(count).cloned().collect()
}

/// The division containing `team_name`, with its teams in division rank order.
pub fn find_division(snapshot: &StandingsSnapshot, team_name: &str) -> Option<DivisionRecord> {
    let mut division = snapshot
        .records
        .iter()
        .find(|division| division.contains_team(team_name))?
        .clone();
    division
        .team_records
        .sort_by_key(|record| rank_ordinal(&record.division_rank));
    Some(division)
}

/// All teams in the division containing `team_name`, by division rank.
pub fn division_standings(snapshot: &StandingsSnapshot, team_name: &str) -> Vec<TeamRecord> {
    find_division(snapshot, team_name)
        .map(|division| division.team_records)
        .unwrap_or_default()
}
