pub mod standings;

pub use standings::{Division, DivisionRecord, League, StandingsSnapshot, Streak, Team, TeamRecord};
