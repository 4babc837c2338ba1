use serde::{Deserialize, Serialize};

/// One complete standings pull, as returned by `GET /api/v1/standings`.
///
/// The cached copy is the JSON serialization of this same type, so a
/// snapshot read back from the store is indistinguishable from a fetched one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StandingsSnapshot {
    pub records: Vec<DivisionRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DivisionRecord {
    #[serde(rename = "standingsType")]
    pub standings_type: String,
    pub league: League,
    pub division: Division,
    #[serde(rename = "teamRecords")]
    pub team_records: Vec<TeamRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct League {
    pub id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Division {
    pub id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A single team's line in the standings.
///
/// Rank fields stay as the text the API sent; use
/// [`rank_ordinal`](crate::data_fetcher::queries::rank_ordinal) to order by them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamRecord {
    pub team: Team,
    pub wins: i32,
    pub losses: i32,
    #[serde(rename = "winningPercentage")]
    pub winning_percentage: String,
    #[serde(rename = "gamesBack")]
    pub games_back: String,
    #[serde(rename = "divisionRank")]
    pub division_rank: String,
    #[serde(rename = "leagueRank")]
    pub league_rank: String,
    #[serde(rename = "sportRank")]
    pub sport_rank: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<Streak>,
    #[serde(rename = "divisionLeader", default)]
    pub division_leader: bool,
    #[serde(rename = "wildCardLeader", default)]
    pub wild_card_leader: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Streak {
    #[serde(rename = "streakType")]
    pub streak_type: String,
    #[serde(rename = "streakNumber")]
    pub streak_number: i32,
    #[serde(rename = "streakCode")]
    pub streak_code: String,
}

impl StandingsSnapshot {
    /// All team records across every division, in response order.
    pub fn teams(&self) -> impl Iterator<Item = &TeamRecord> {
        self.records
            .iter()
            .flat_map(|division| division.team_records.iter())
    }
}

impl DivisionRecord {
    pub fn contains_team(&self, team_name: &str) -> bool {
        self.team_records
            .iter()
            .any(|record| record.team.name == team_name)
    }
}

impl TeamRecord {
    /// `"wins-losses"`, e.g. `"94-68"`
    pub fn record_text(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }
}
