/// Club nickname fragments and their scoreboard abbreviations.
///
/// Matched in order against the full display name, so "Red Sox" and
/// "White Sox" must come before any shorter fragment they contain.
const TEAM_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Yankees", "NYY"),
    ("Blue Jays", "TOR"),
    ("Rays", "TB"),
    ("Red Sox", "BOS"),
    ("Orioles", "BAL"),
    ("Tigers", "DET"),
    ("Guardians", "CLE"),
    ("Twins", "MIN"),
    ("Royals", "KC"),
    ("White Sox", "CWS"),
    ("Astros", "HOU"),
    ("Mariners", "SEA"),
    ("Angels", "LAA"),
    ("Rangers", "TEX"),
    ("Athletics", "OAK"),
    ("Phillies", "PHI"),
    ("Mets", "NYM"),
    ("Braves", "ATL"),
    ("Marlins", "MIA"),
    ("Nationals", "WSH"),
    ("Cubs", "CHC"),
    ("Brewers", "MIL"),
    ("Cardinals", "STL"),
    ("Reds", "CIN"),
    ("Pirates", "PIT"),
    ("Dodgers", "LAD"),
    ("Padres", "SD"),
    ("Giants", "SF"),
    ("Diamondbacks", "ARI"),
    ("Rockies", "COL"),
];

/// Display names of the 30 clubs as the Stats API spells them.
pub const CLUB_NAMES: [&str; 30] = [
    "Arizona Diamondbacks",
    "Atlanta Braves",
    "Baltimore Orioles",
    "Boston Red Sox",
    "Chicago Cubs",
    "Chicago White Sox",
    "Cincinnati Reds",
    "Cleveland Guardians",
    "Colorado Rockies",
    "Detroit Tigers",
    "Houston Astros",
    "Kansas City Royals",
    "Los Angeles Angels",
    "Los Angeles Dodgers",
    "Miami Marlins",
    "Milwaukee Brewers",
    "Minnesota Twins",
    "New York Mets",
    "New York Yankees",
    "Athletics",
    "Philadelphia Phillies",
    "Pittsburgh Pirates",
    "San Diego Padres",
    "San Francisco Giants",
    "Seattle Mariners",
    "St. Louis Cardinals",
    "Tampa Bay Rays",
    "Texas Rangers",
    "Toronto Blue Jays",
    "Washington Nationals",
];

/// Whether `team_name` is exactly one of [`CLUB_NAMES`].
pub fn is_known_club(team_name: &str) -> bool {
    CLUB_NAMES.iter().any(|name| *name == team_name)
}

/// Stats API division ids and their names, for responses sent without
/// division names.
const DIVISION_NAMES: &[(i32, &str)] = &[
    (200, "American League West"),
    (201, "American League East"),
    (202, "American League Central"),
    (203, "National League West"),
    (204, "National League East"),
    (205, "National League Central"),
];

pub fn division_name(division_id: i32) -> Option<&'static str> {
    DIVISION_NAMES
        .iter()
        .find(|(id, _)| *id == division_id)
        .map(|(_, name)| *name)
}

/// Returns the short scoreboard code for a club display name.
///
/// Unknown names fall back to their first three characters, upper-cased.
///
/// # Examples
/// ```
/// use mlb_standings::display::team_abbreviation;
///
/// assert_eq!(team_abbreviation("New York Yankees"), "NYY");
/// assert_eq!(team_abbreviation("San Diego Padres"), "SD");
/// assert_eq!(team_abbreviation("Springfield Isotopes"), "SPR");
/// ```
pub fn team_abbreviation(team_name: &str) -> String {
    TEAM_ABBREVIATIONS
        .iter()
        .find(|(fragment, _)| team_name.contains(fragment))
        .map(|(_, abbreviation)| abbreviation.to_string())
        .unwrap_or_else(|| team_name.chars().take(3).collect::<String>().to_uppercase())
}
